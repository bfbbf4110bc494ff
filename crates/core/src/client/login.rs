use super::{DvripClient, LoginState};
use crate::dvrip::login::{ClientLogin, ClientLoginReply, ClientLogout, Hash, KeepAlive};
use crate::dvrip::message::Session;
use crate::Result;
use log::debug;
use tokio::time::{Duration, Instant};

impl DvripClient {
    /// Authenticates with a plaintext password.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<ClientLoginReply> {
        self.login_hash(username, Hash::XmMd5.digest(password), Hash::XmMd5)
            .await
    }

    /// Authenticates with a precomputed password hash.
    ///
    /// The request goes out under session zero and sequence zero; on
    /// success the server assigned session is adopted for everything that
    /// follows and the keep alive clock starts. A failed login leaves the
    /// connection unauthenticated. Calling this on an authenticated client
    /// is a contract violation.
    pub async fn login_hash(
        &mut self,
        username: &str,
        passhash: String,
        hash: Hash,
    ) -> Result<ClientLoginReply> {
        assert!(self.login.is_none(), "login on an authenticated connection");
        let now = Instant::now();
        let request = ClientLogin {
            username: username.to_owned(),
            passhash,
            hash,
            service: "DVRIP-Web".to_owned(),
        };
        let reply = self.connection.request(&request).await?;
        debug!(
            "logged in as {} with session {}, keep alive {}s",
            username, reply.session, reply.timeout
        );
        self.connection.set_session(reply.session);
        self.login = Some(LoginState {
            username: username.to_owned(),
            interval: Duration::from_secs(u64::from(reply.timeout)),
            last: now,
            chassis: reply.chassis.clone(),
        });
        Ok(reply)
    }

    /// Signs out and forgets the session. The socket stays open, so a
    /// fresh login over the same connection is possible.
    pub async fn logout(&mut self) -> Result<()> {
        let username = self
            .login
            .as_ref()
            .map(|state| state.username.clone())
            .unwrap_or_default();
        let request = ClientLogout {
            username,
            session: self.session(),
        };
        self.connection.request(&request).await?;
        self.connection.set_session(Session::NONE);
        self.login = None;
        Ok(())
    }

    /// Tells the device we are still here, but only once the advertised
    /// interval has lapsed since the last one; otherwise a silent no-op.
    pub async fn keepalive(&mut self) -> Result<()> {
        let due = match &self.login {
            Some(state) => state.last.elapsed() >= state.interval,
            None => false,
        };
        if !due {
            return Ok(());
        }
        let request = KeepAlive {
            command: Default::default(),
            session: self.session(),
        };
        self.connection.request(&request).await?;
        if let Some(state) = &mut self.login {
            state.last = Instant::now();
        }
        Ok(())
    }
}
