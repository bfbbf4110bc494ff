use super::DvripClient;
use crate::dvrip::convert::Maybe;
use crate::dvrip::files::{File, FileQuery, GetFiles};
use crate::dvrip::status::Status;
use crate::Result;
use log::trace;

impl DvripClient {
    /// Searches the recorded file index, walking the device's pagination.
    ///
    /// Each page resumes from the start time of the previous page's last
    /// entry, and the device echoes that entry at the top of the next page;
    /// the echoed overlap is dropped so entries come out unique and in
    /// order. Iteration stops when the device reports a complete search,
    /// returns an empty page, or repeats the previous page's last entry.
    pub async fn files(&mut self, query: FileQuery) -> Result<Vec<File>> {
        let mut query = query;
        let mut found = Vec::new();
        let mut last: Option<File> = None;

        loop {
            let request = GetFiles {
                command: Default::default(),
                session: self.session(),
                query: query.clone(),
            };
            let reply = self.connection.request(&request).await?;
            let files = match reply.files {
                Maybe::Present(files) => files,
                Maybe::Absent => return Ok(found),
            };
            trace!("file page with {} entries, status {}", files.len(), reply.status);

            // Skip the echo of the previous page's tail, but only up to the
            // point where it actually appears.
            let mut dropping = true;
            for file in &files {
                if Some(file) == last.as_ref() {
                    dropping = false;
                } else if last.is_none() || !dropping {
                    found.push(file.clone());
                }
            }

            if reply.status == Status::SearchComplete
                || files.is_empty()
                || files.last() == last.as_ref()
            {
                return Ok(found);
            }
            let tail = files[files.len() - 1].clone();
            query.start = tail.start;
            last = Some(tail);
        }
    }
}
