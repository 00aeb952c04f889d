#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::{ApiResponse, AppState};
    use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue, StatusCode};
    use axum::Router;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use common::{LoginRequest, LoginResponse, OwnerRequest};
    use migration::{Migrator, MigratorTrait};
    use service::{owner, Store, TokenIssuer};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    pub const TEST_PASSWORD: &str = "password";

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> Store {
        let store = Store::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(store.connection(), None)
            .await
            .expect("Failed to run migrations");

        store
    }

    pub fn test_token_issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret-key", "realty", "realty-clients", 120)
    }

    fn owner_request(name: &str, username: &str, birthday: NaiveDate) -> OwnerRequest {
        OwnerRequest {
            name: name.to_string(),
            address: "123 Main St".to_string(),
            photo: "photo.jpg".to_string(),
            birthday,
            username: username.to_string(),
            password: TEST_PASSWORD.to_string(),
        }
    }

    /// Create AppState for testing, with owners `john` and `jane` registered
    pub async fn setup_test_app_state() -> AppState {
        let store = setup_test_db().await;

        owner::create(
            &store,
            owner_request("John Doe", "john", NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()),
        )
        .await
        .expect("Failed to create test owner john");
        owner::create(
            &store,
            owner_request("Jane Smith", "jane", NaiveDate::from_ymd_opt(1990, 5, 15).unwrap()),
        )
        .await
        .expect("Failed to create test owner jane");

        AppState {
            store,
            tokens: test_token_issuer(),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN.
    fn init_test_tracing() {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        // Another test may already have installed it.
        let _ = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        init_test_tracing();

        let state = setup_test_app_state().await;
        create_router(state)
    }

    pub async fn setup_test_server() -> TestServer {
        TestServer::new(setup_test_app().await).unwrap()
    }

    /// Log in one of the default test owners and return the bearer token.
    pub async fn login(server: &TestServer, username: &str) -> String {
        login_with(server, username, TEST_PASSWORD).await
    }

    /// Log in through the API and return the bearer token.
    pub async fn login_with(server: &TestServer, username: &str, password: &str) -> String {
        let response = server
            .post("/api/owners/login")
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<LoginResponse> = response.json();
        body.data.token
    }

    /// `Authorization` header carrying `token`.
    pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
        (
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        )
    }
}
