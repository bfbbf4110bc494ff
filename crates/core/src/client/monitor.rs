use super::{DvripClient, Reader};
use crate::dvrip::monitor::{DoMonitor, Monitor, MonitorAction, MonitorClaim, MonitorParams, StreamKind};
use crate::Result;
use tokio::net::TcpStream;

impl DvripClient {
    /// Starts live monitoring of `channel`; the bytes arrive on `stream`,
    /// a second socket connected to the same device.
    pub async fn monitor(
        &mut self,
        stream: TcpStream,
        channel: u32,
        kind: StreamKind,
    ) -> Result<Reader> {
        let monitor = Monitor {
            action: MonitorAction::Start,
            params: MonitorParams {
                channel,
                stream: kind,
                transport: Default::default(),
            },
        };
        let claim = MonitorClaim {
            session: self.session(),
            command: Default::default(),
            monitor,
        };
        let request = DoMonitor {
            session: self.session(),
            command: Default::default(),
            monitor,
        };
        self.reader(stream, &claim, &request).await
    }
}
