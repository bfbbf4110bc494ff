use super::DvripClient;
use crate::dvrip::log::{GetLog, LogEntry, LogQuery};
use crate::Result;

impl DvripClient {
    /// Fetches log entries, following the device's positional pagination:
    /// each page resumes one past the previous page's last position, and a
    /// null or empty page ends the walk.
    pub async fn log(&mut self, query: LogQuery) -> Result<Vec<LogEntry>> {
        let mut query = query;
        let mut found = Vec::new();

        loop {
            let request = GetLog {
                session: self.session(),
                command: Default::default(),
                query: query.clone(),
            };
            let reply = self.connection.request(&request).await?;
            let entries = match reply.entries {
                Some(entries) if !entries.is_empty() => entries,
                _ => return Ok(found),
            };
            query.offset = entries[entries.len() - 1].number + 1;
            found.extend(entries);
        }
    }
}
