use super::{Connection, DvripClient};
use crate::dvrip::filter::{ControlFilter, StreamFilter, Verdict};
use crate::dvrip::message::{Claim, Reply as _, Request};
use crate::{DecodeError, RequestError, Result};
use bytes::Bytes;
use futures::Stream;
use tokio::net::TcpStream;

/// The receiving end of a claim/data exchange: a secondary connection that
/// carries nothing but stream data packets until the device flags the end.
#[derive(Debug)]
pub struct Reader {
    connection: Connection,
    filter: StreamFilter,
}

impl Reader {
    fn new(connection: Connection, filter: StreamFilter) -> Reader {
        Reader { connection, filter }
    }

    /// The next chunk of stream bytes, or `None` at the end of the stream
    /// and on every call thereafter.
    pub async fn read_chunk(&mut self) -> Result<Option<Bytes>> {
        while !self.filter.is_done() {
            let packet = self.connection.recv_packet().await?;
            match self.filter.accept(packet) {
                Verdict::Ready(chunk) => return Ok(Some(chunk)),
                Verdict::Consumed => continue,
                Verdict::Foreign(_) => return Err(DecodeError::StrayPacket.into()),
            }
        }
        Ok(None)
    }

    /// The remaining chunks as a [`Stream`].
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes>> {
        futures::stream::try_unfold(self, |mut reader| async move {
            match reader.read_chunk().await {
                Ok(Some(chunk)) => Ok(Some((chunk, reader))),
                Ok(None) => Ok(None),
                Err(error) => Err(error),
            }
        })
    }
}

impl DvripClient {
    /// Runs the claim/data pairing over a second socket to the device.
    ///
    /// The claim goes out on the secondary connection first, then the
    /// perform request runs its usual course on the control connection, and
    /// only then is the claim's own reply awaited where it was sent. The
    /// two connections share the session but not the number space.
    pub(crate) async fn reader<C, R>(
        &mut self,
        stream: TcpStream,
        claim: &C,
        request: &R,
    ) -> Result<Reader>
    where
        C: Claim,
        R: Request,
    {
        let mut data = Connection::new(stream, self.session());
        let number = data.number();
        data.send(number, claim).await?;
        self.connection.request(request).await?;

        let mut filter = ControlFilter::<C::Reply>::new(number);
        let reply = data.recv(&mut filter).await?;
        let status = reply.status();
        if !status.success() {
            return Err(RequestError::new(status, claim, &reply).into());
        }
        Ok(Reader::new(data, StreamFilter::new(C::DATA)))
    }
}
