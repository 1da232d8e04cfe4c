//! Fixed catalog restored on every process start.

use super::models::Book;

const GOODREADS_COVERS: &str =
    "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books";

fn book(id: i64, title: &str, author: &str, available: bool, image: String) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        available,
        image,
    }
}

fn cover(path: &str) -> String {
    format!("{}/{}", GOODREADS_COVERS, path)
}

/// The ten seed records, ids 1 through 10 in insertion order.
pub fn books() -> Vec<Book> {
    vec![
        book(1, "The Hunger Games", "Suzanne Collins", true, "/the_hunger_games.png".to_string()),
        book(2, "Harry Potter", "J.K Rowling", false, "/harry_potter.png".to_string()),
        book(3, "Pride and Prejudice", "Jane Austen, Anna Quindlen", true, cover("1320399351i/1885.jpg")),
        book(4, "To Kill a Mockingbird", "Harper Lee", true, cover("1553383690i/2657.jpg")),
        book(5, "The Book Thief", "Markus Zusak", true, cover("1522157426i/19063.jpg")),
        book(6, "Twilight", "Stephenie Meyer", true, cover("1700522826i/41865.jpg")),
        book(7, "The Chronicles of Narnia", "C.S. Lewis, Pauline Baynes", true, cover("1661032875i/11127.jpg")),
        book(8, "The Fault in Our Stars", "John Green", true, cover("1660273739i/11870085.jpg")),
        book(9, "The Picture of Dorian Gray", "Oscar Wilde, Jeffrey Eugenides", true, cover("1546103428i/5297.jpg")),
        book(10, "The Giving Tree", "Shel Silverstein", true, cover("1725807591i/370493.jpg")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_sequential() {
        let ids: Vec<i64> = books().iter().map(|b| b.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn only_harry_potter_is_checked_out() {
        let unavailable: Vec<String> = books()
            .into_iter()
            .filter(|b| !b.available)
            .map(|b| b.title)
            .collect();
        assert_eq!(unavailable, vec!["Harry Potter".to_string()]);
    }
}
