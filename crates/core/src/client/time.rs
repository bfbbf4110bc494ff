use super::DvripClient;
use crate::dvrip::convert::{DvrTime, Maybe};
use crate::dvrip::operation::{DoOperation, GetTime, Operation};
use crate::Result;
use time::PrimitiveDateTime;

impl DvripClient {
    /// Reads the device clock. `None` means the device does not know what
    /// time it is.
    pub async fn time(&mut self) -> Result<Option<PrimitiveDateTime>> {
        let request = GetTime {
            command: Default::default(),
            session: self.session(),
        };
        let reply = self.connection.request(&request).await?;
        Ok(reply.time.0)
    }

    /// Sets the device clock.
    pub async fn set_time(&mut self, to: PrimitiveDateTime) -> Result<()> {
        let mut request = DoOperation::new(Operation::SetTime, self.session());
        request.set_time = Maybe::Present(DvrTime(Some(to)));
        self.connection.request(&request).await?;
        Ok(())
    }
}
