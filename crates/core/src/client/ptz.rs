use super::DvripClient;
use crate::dvrip::ptz::{DoPtz, Ptz, PtzButton, PtzParams};
use crate::Result;

impl DvripClient {
    /// Presses a PTZ control button on `channel`.
    pub async fn button(&mut self, channel: u32, button: PtzButton) -> Result<()> {
        let request = DoPtz {
            session: self.session(),
            command: Default::default(),
            ptz: Ptz {
                button,
                params: PtzParams::new(channel),
            },
        };
        self.connection.request(&request).await?;
        Ok(())
    }
}
