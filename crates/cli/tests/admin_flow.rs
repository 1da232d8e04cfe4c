//! Drives the views against a real router bound to an ephemeral port.

use reqwest::StatusCode;
use shelf_app::NewBook;
use shelf_cli::{AdminView, BookEdit, BooksClient, CatalogView, ClientError};
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

async fn spawn_server(admin_password: Option<&str>) -> String {
    let mut settings = Settings::default();
    settings.auth.admin_password = admin_password.map(str::to_string);

    let mut registry = ModuleRegistry::new();
    shelf_app::register_all(&mut registry, &settings);
    registry
        .bootstrap(&InitCtx {
            settings: &settings,
        })
        .await
        .unwrap();

    let app = shelf_http::build_router(&registry, &settings);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", address)
}

fn new_book(title: &str) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: "Astrid Lindgren".to_string(),
        available: true,
        image: "/pippi.png".to_string(),
    }
}

#[tokio::test]
async fn admin_round_trip_reconciles_locally() {
    let base_url = spawn_server(None).await;
    let client = BooksClient::new(&base_url).unwrap();

    let catalog = CatalogView::load(&client).await.unwrap();
    assert_eq!(catalog.books().len(), 10);
    assert!(catalog.render().contains("Harry Potter\n  by J.K Rowling\n  Not Available"));

    let mut admin = AdminView::load(client.clone()).await.unwrap();

    let added = admin.add(new_book("Pippi Longstocking")).await.unwrap().clone();
    assert_eq!(added.id, 11);
    assert_eq!(admin.books().len(), 11);

    let edit = BookEdit {
        title: Some("Pippi Goes on Board".to_string()),
        ..BookEdit::default()
    };
    let updated = admin.edit(11, &edit).await.unwrap().clone();
    assert_eq!(updated.title, "Pippi Goes on Board");
    assert_eq!(updated.author, added.author);

    let server_view = client.list_books().await.unwrap();
    assert_eq!(server_view, admin.books());

    let ack = admin.remove(11).await.unwrap();
    assert_eq!(ack.message, "Book deleted successfully");
    assert_eq!(admin.books().len(), 10);

    let err = admin.remove(11).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(client.list_books().await.unwrap().len(), 10);
}

#[tokio::test]
async fn other_clients_changes_are_invisible_until_reload() {
    let base_url = spawn_server(None).await;
    let client = BooksClient::new(&base_url).unwrap();

    let stale = CatalogView::load(&client).await.unwrap();
    client.delete_book(1).await.unwrap();

    assert_eq!(stale.books().len(), 10);
    assert_eq!(CatalogView::load(&client).await.unwrap().books().len(), 9);
}

#[tokio::test]
async fn password_gate_is_enforced_by_the_server() {
    let base_url = spawn_server(Some("moomin")).await;
    let anonymous = BooksClient::new(&base_url).unwrap();

    let err = anonymous.open_session("snufkin").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(err.to_string().contains("Incorrect password. Please try again."));
    anonymous.open_session("moomin").await.unwrap();

    let err = anonymous
        .create_book(&new_book("Ronja"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { .. }));
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(anonymous.list_books().await.unwrap().len(), 10);

    let admin = anonymous.with_admin_password(Some("moomin".to_string()));
    let created = admin.create_book(&new_book("Ronja")).await.unwrap();
    assert_eq!(created.id, 11);
}
