use std::net::TcpListener;
use std::sync::Arc;
use once_cell::sync::Lazy;

use predictor_backend::run;
use predictor_backend::telemetry::{get_subscriber, init_subscriber};

use super::fake_repository::FakeRepository;

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub repository: Arc<FakeRepository>,
}

pub fn init_tracing() {
    Lazy::force(&TRACING);
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Arc::new(FakeRepository::new())).await
}

pub async fn spawn_app_with(repository: Arc<FakeRepository>) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = run(listener, repository.clone())
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        repository,
    }
}
