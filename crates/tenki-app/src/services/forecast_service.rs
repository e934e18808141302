use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use tenki_weather::{ForecastQuery, SharedForecastService};

use super::ServiceMessage;

/// Fetch the forecast for `query` asynchronously.
/// Sends `ForecastDone` on the channel when complete.
pub fn request_forecast(
    tx: &UnboundedSender<ServiceMessage>,
    runtime: &Handle,
    service: SharedForecastService,
    query: ForecastQuery,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        let result = service.fetch(&query).await;
        let _ = tx.send(ServiceMessage::ForecastDone(result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tenki_weather::{Coordinates, ErrorKind, OpenMeteoProvider, Timezone};
    use wiremock::MockServer;

    #[tokio::test]
    async fn unreachable_service_reports_failure() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        // Bind a port, then release it so nothing is listening there
        let mock_server = MockServer::start().await;
        let endpoint = format!("{}/v1/forecast", mock_server.uri());
        drop(mock_server);

        let provider = OpenMeteoProvider::with_endpoint(&endpoint, Duration::from_secs(2)).unwrap();
        let query = ForecastQuery {
            coordinates: Coordinates::new(35.6895, 139.6917),
            timezone: Timezone::AsiaTokyo,
        };

        request_forecast(&tx, &Handle::current(), Arc::new(provider), query);

        match rx.recv().await {
            Some(ServiceMessage::ForecastDone(Err(e))) => {
                assert_eq!(e.kind(), ErrorKind::ForecastFetchFailed);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
