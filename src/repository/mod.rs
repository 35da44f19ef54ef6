//! Repository layer for database operations
//!
//! The pool is injected at construction time and shared by the
//! sub-repositories; nothing in the crate touches an ambient connection.

pub mod authors;
pub mod books;
pub mod fines;
pub mod gd;
pub mod librarians;
pub mod publishers;
pub mod reservations;
pub mod students;

use sqlx::{Pool, Postgres};

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub students: students::StudentsRepository,
    pub librarians: librarians::LibrariansRepository,
    pub authors: authors::AuthorsRepository,
    pub publishers: publishers::PublishersRepository,
    pub books: books::BooksRepository,
    pub reservations: reservations::ReservationsRepository,
    pub fines: fines::FinesRepository,
    pub gd: gd::GdRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            students: students::StudentsRepository::new(pool.clone()),
            librarians: librarians::LibrariansRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            publishers: publishers::PublishersRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            fines: fines::FinesRepository::new(pool.clone()),
            gd: gd::GdRepository::new(pool.clone()),
            pool,
        }
    }
}
