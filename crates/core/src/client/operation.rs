use super::DvripClient;
use crate::dvrip::convert::Maybe;
use crate::dvrip::operation::{DoOperation, Machine, MachineOperation, Operation};
use crate::Result;
use log::debug;

impl DvripClient {
    /// Reboots the device.
    ///
    /// Consumes the client: the device acknowledges the request and then
    /// drops dead, so the socket is closed unconditionally afterwards.
    pub async fn reboot(mut self) -> Result<()> {
        let mut request = DoOperation::new(Operation::Machine, self.session());
        request.machine = Maybe::Present(MachineOperation {
            action: Machine::Reboot,
        });
        self.connection.request(&request).await?;
        debug!("device rebooting");
        Ok(())
    }
}
