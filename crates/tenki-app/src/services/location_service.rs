use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use tenki_weather::location::{self, SharedLocation};

use super::ServiceMessage;

/// Request the current position asynchronously.
/// Sends `LocationDone` on the channel when complete.
pub fn request_location(
    tx: &UnboundedSender<ServiceMessage>,
    runtime: &Handle,
    capability: SharedLocation,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        let result = location::current_location(capability.as_ref()).await;
        let _ = tx.send(ServiceMessage::LocationDone(result));
    });
}
