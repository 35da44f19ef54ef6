//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, books, fines, gd, health, librarians, publishers, reservations, students};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Athenaeum API",
        version = "0.1.0",
        description = "Campus Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        // Students
        students::register,
        students::get_profile,
        students::update_profile,
        students::list_all,
        students::update,
        students::delete,
        // Librarians
        librarians::register,
        librarians::list,
        librarians::delete,
        // Books
        books::list,
        books::create,
        books::update,
        books::delete,
        // Authors & publishers
        authors::list,
        authors::create,
        publishers::list,
        publishers::create,
        // Reservations
        reservations::reserve,
        reservations::return_book,
        reservations::list_own,
        reservations::list_all,
        reservations::admin_delete,
        // Fines
        fines::issue,
        fines::pay,
        fines::list_own,
        fines::list_all,
        fines::delete,
        // GD rooms
        gd::list_rooms,
        gd::create_room,
        gd::reserve,
        gd::list_own,
        gd::list_all,
        gd::cancel,
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::error::FieldViolation,
            // Auth
            crate::models::auth::Role,
            crate::models::auth::LoginRequest,
            crate::models::auth::TokenResponse,
            // Students
            crate::models::student::Student,
            crate::models::student::MembershipType,
            crate::models::student::RegisterStudent,
            crate::models::student::UpdateStudent,
            crate::models::student::UpdateProfile,
            // Librarians
            crate::models::librarian::Librarian,
            crate::models::librarian::RegisterLibrarian,
            // Catalog
            crate::models::book::Book,
            crate::models::book::BookDetails,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::publisher::Publisher,
            crate::models::publisher::CreatePublisher,
            // Reservations
            crate::models::reservation::Reservation,
            crate::models::reservation::ReservationDetails,
            crate::models::reservation::ReservationOverview,
            crate::models::reservation::ReserveBook,
            crate::models::reservation::ReturnBook,
            // Fines
            crate::models::fine::Fine,
            crate::models::fine::FineOverview,
            crate::models::fine::PaymentStatus,
            crate::models::fine::IssueFine,
            crate::models::fine::PayFine,
            // GD rooms
            crate::models::gd::GdRoom,
            crate::models::gd::CreateGdRoom,
            crate::models::gd::GdStatus,
            crate::models::gd::GdReservation,
            crate::models::gd::GdReservationDetails,
            crate::models::gd::ReserveGdRoom,
            // Shared responses
            students::MessageResponse,
            books::CreatedResponse,
            reservations::ReservationCreatedResponse,
            fines::FineCreatedResponse,
            gd::RoomCreatedResponse,
            gd::GdReservationCreatedResponse,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Authentication"),
        (name = "students", description = "Student accounts"),
        (name = "librarians", description = "Librarian accounts"),
        (name = "books", description = "Book catalog"),
        (name = "catalog", description = "Authors and publishers"),
        (name = "reservations", description = "Book reservations"),
        (name = "fines", description = "Fines"),
        (name = "gd", description = "Group discussion rooms")
    )
)]
pub struct ApiDoc;

/// Create a router serving the Swagger UI and the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
