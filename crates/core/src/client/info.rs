use super::DvripClient;
use crate::dvrip::convert::Maybe;
use crate::dvrip::info::{GetInfo, Info, SystemInfo};
use crate::{DecodeError, Result};

impl DvripClient {
    /// Fetches the device's [`SystemInfo`] block, with the chassis type
    /// from the login reply filled in.
    pub async fn system_info(&mut self) -> Result<SystemInfo> {
        let request = GetInfo {
            category: Info::System,
            session: self.session(),
        };
        let reply = self.connection.request(&request).await?;
        let mut system = match reply.system {
            Maybe::Present(system) => system,
            Maybe::Absent => {
                return Err(DecodeError::UnintelligibleReply {
                    why: "expected a SystemInfo block",
                }
                .into())
            }
        };
        system.chassis = self.login.as_ref().map(|state| state.chassis.clone());
        Ok(system)
    }
}
