pub mod models;
pub mod routes;
pub mod seed;
pub mod store;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use shelf_authz::AdminGuard;
use shelf_kernel::{InitCtx, Module};

use routes::BooksState;
use store::{BookStore, InMemoryBookStore};

/// Books module: owns the catalog store and serves the book resource
pub struct BooksModule {
    store: Arc<dyn BookStore>,
    guard: AdminGuard,
}

impl BooksModule {
    pub fn new(store: Arc<dyn BookStore>, guard: AdminGuard) -> Self {
        Self { store, guard }
    }

    pub fn store(&self) -> &Arc<dyn BookStore> {
        &self.store
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let seed = if ctx.settings.store.seed {
            seed::books()
        } else {
            Vec::new()
        };
        let count = seed.len();

        self.store
            .reset(seed)
            .await
            .context("failed to seed book store")?;

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = count,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(BooksState {
            store: self.store.clone(),
            guard: self.guard.clone(),
        })
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let book_ref = serde_json::json!({ "$ref": "#/components/schemas/Book" });
        let error_ref = serde_json::json!({
            "description": "Error",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let admin = serde_json::json!([{ "admin_bearer": [] }]);

        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Every book in insertion order",
                                "content": {
                                    "application/json": {
                                        "schema": { "type": "array", "items": book_ref }
                                    }
                                }
                            },
                            "500": error_ref
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "security": admin,
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/NewBook" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created book with its assigned id",
                                "content": { "application/json": { "schema": book_ref } }
                            },
                            "401": error_ref,
                            "500": error_ref
                        }
                    },
                    "put": {
                        "summary": "Replace a book",
                        "tags": ["Books"],
                        "security": admin,
                        "requestBody": {
                            "required": true,
                            "content": { "application/json": { "schema": book_ref } }
                        },
                        "responses": {
                            "200": {
                                "description": "Updated book",
                                "content": { "application/json": { "schema": book_ref } }
                            },
                            "401": error_ref,
                            "404": error_ref,
                            "500": error_ref
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "security": admin,
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/DeleteBook" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Book deleted",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Acknowledgement" }
                                    }
                                }
                            },
                            "401": error_ref,
                            "404": error_ref,
                            "500": error_ref
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": { "text/plain": { "schema": { "type": "string" } } }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64", "description": "Server-assigned identifier" },
                            "title": { "type": "string", "description": "Title of the book" },
                            "author": { "type": "string", "description": "Author(s) of the book" },
                            "available": { "type": "boolean", "description": "Whether the book can be borrowed" },
                            "image": { "type": "string", "description": "Cover image URL or path" }
                        },
                        "required": ["id", "title", "author", "available", "image"]
                    },
                    "NewBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "available": { "type": "boolean", "default": true },
                            "image": { "type": "string" }
                        },
                        "required": ["title", "author", "image"]
                    },
                    "DeleteBook": {
                        "type": "object",
                        "properties": { "id": { "type": "integer", "format": "int64" } },
                        "required": ["id"]
                    },
                    "Acknowledgement": {
                        "type": "object",
                        "properties": { "message": { "type": "string" } },
                        "required": ["message"]
                    }
                },
                "securitySchemes": {
                    "admin_bearer": { "type": "http", "scheme": "bearer" }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.store
            .clear()
            .await
            .context("failed to clear book store")?;
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create the books module backed by a fresh in-memory store
pub fn create_module(guard: AdminGuard) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(Arc::new(InMemoryBookStore::new()), guard))
}
