//! Catalog service: books, authors, publishers

use crate::{
    error::AppResult,
    models::{
        author::{Author, CreateAuthor},
        book::{Book, BookDetails, CreateBook, UpdateBook},
        publisher::{CreatePublisher, Publisher},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self) -> AppResult<Vec<BookDetails>> {
        self.repository.books.list().await
    }

    pub async fn create_book(&self, book: CreateBook) -> AppResult<i32> {
        self.repository.books.create(&book).await
    }

    pub async fn update_book(&self, id: i32, update: UpdateBook) -> AppResult<Book> {
        self.repository.books.update(id, &update).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<i32> {
        self.repository.authors.create(&author).await
    }

    pub async fn list_publishers(&self) -> AppResult<Vec<Publisher>> {
        self.repository.publishers.list().await
    }

    pub async fn create_publisher(&self, publisher: CreatePublisher) -> AppResult<i32> {
        self.repository.publishers.create(&publisher).await
    }
}
