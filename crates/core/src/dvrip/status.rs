//! The closed set of DVRIP result codes.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

macro_rules! statuses {
    ($($name:ident = ($code:literal, $success:literal, $message:literal),)+) => {
        /// A result code from the device, carried under the JSON key `Ret`.
        ///
        /// The set is fixed and part of the wire contract; unknown codes are
        /// a decode error. A handful of messages are placeholders for codes
        /// the vendor documents only with untranslated hints.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum Status {
            $($name,)+
        }

        impl Status {
            /// Looks up a known status code.
            pub fn from_code(code: u32) -> Option<Status> {
                match code {
                    $($code => Some(Status::$name),)+
                    _ => None,
                }
            }

            /// The numeric code.
            pub fn code(self) -> u32 {
                match self {
                    $(Status::$name => $code,)+
                }
            }

            /// Whether the code reports success.
            pub fn success(self) -> bool {
                match self {
                    $(Status::$name => $success,)+
                }
            }

            /// A human readable description.
            pub fn message(self) -> &'static str {
                match self {
                    $(Status::$name => $message,)+
                }
            }
        }
    };
}

statuses! {
    Ok             = (100, true,  "OK"),
    Error          = (101, false, "Unknown error"),
    Version        = (102, false, "Invalid version"),
    Request        = (103, false, "Invalid request"),
    ExLogin        = (104, false, "Already logged in"),
    NoLogin        = (105, false, "Not logged in"),
    Creds          = (106, false, "Wrong username or password"),
    Access         = (107, false, "Access denied"),
    Timeout        = (108, false, "Timed out"),
    File           = (109, false, "File not found"),
    SearchComplete = (110, true,  "Complete search results"),
    SearchPartial  = (111, true,  "Partial search results"),
    ExUser         = (112, false, "User already exists"),
    NoUser         = (113, false, "User does not exist"),
    ExGroup        = (114, false, "Group already exists"),
    NoGroup        = (115, false, "Group does not exist"),
    Message        = (117, false, "Invalid message"),
    PtzProtocol    = (118, false, "PTZ protocol not set"),
    SearchNone     = (119, true,  "No search results"),
    Disabled       = (120, false, "Disabled"),
    Connect        = (121, false, "Channel not connected"),
    Reboot         = (150, true,  "Reboot required"),
    Error202       = (202, false, "FIXME Error 202"),
    Password       = (203, false, "Wrong password"),
    Username       = (204, false, "Wrong username"),
    Lockout        = (205, false, "Locked out"),
    Banned         = (206, false, "Banned"),
    Conflict       = (207, false, "Already logged in"),
    Input          = (208, false, "Illegal value"),
    Error209       = (209, false, "FIXME Error 209"),
    Error210       = (210, false, "FIXME Error 210"),
    Object         = (211, false, "Object does not exist"),
    Account        = (212, false, "Account in use"),
    Subset         = (213, false, "Subset larger than superset"),
    PassChars      = (214, false, "Illegal characters in password"),
    PassMatch      = (215, false, "Passwords do not match"),
    UserReserved   = (216, false, "Username reserved"),
    Command        = (502, false, "Illegal command"),
    IntercomOn     = (503, true,  "Intercom turned on"),
    IntercomOff    = (504, true,  "Intercom turned off"),
    UpgradeStarted = (511, true,  "Upgrade started"),
    UpgradeIdle    = (512, false, "Upgrade not started"),
    UpgradeData    = (513, false, "Invalid upgrade data"),
    Upgraded       = (514, true,  "Upgrade successful"),
    UpgradeFailed  = (515, false, "Upgrade failed"),
    ResetFailed    = (521, false, "Reset failed"),
    Reset          = (522, true,  "Reset successful--reboot required"),
    ResetData      = (523, false, "Reset data invalid"),
    Import         = (602, true,  "Import successful--restart required"),
    ImportReboot   = (603, true,  "Import successful--reboot required"),
    Writing        = (604, false, "Configuration write failed"),
    Feature        = (605, false, "Unsupported feature in configuration"),
    Reading        = (606, false, "Configuration read failed"),
    NoImport       = (607, false, "Configuration not found"),
    Syntax         = (608, false, "Illegal configuration syntax"),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Status, D::Error> {
        let code = u32::deserialize(deserializer)?;
        Status::from_code(code).ok_or_else(|| D::Error::custom("not a known status code"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[(u32, bool)] = &[
        (100, true),
        (101, false),
        (102, false),
        (103, false),
        (104, false),
        (105, false),
        (106, false),
        (107, false),
        (108, false),
        (109, false),
        (110, true),
        (111, true),
        (112, false),
        (113, false),
        (114, false),
        (115, false),
        (117, false),
        (118, false),
        (119, true),
        (120, false),
        (121, false),
        (150, true),
        (202, false),
        (203, false),
        (204, false),
        (205, false),
        (206, false),
        (207, false),
        (208, false),
        (209, false),
        (210, false),
        (211, false),
        (212, false),
        (213, false),
        (214, false),
        (215, false),
        (216, false),
        (502, false),
        (503, true),
        (504, true),
        (511, true),
        (512, false),
        (513, false),
        (514, true),
        (515, false),
        (521, false),
        (522, true),
        (523, false),
        (602, true),
        (603, true),
        (604, false),
        (605, false),
        (606, false),
        (607, false),
        (608, false),
    ];

    #[test]
    fn test_polarity() {
        for &(code, success) in ALL {
            let status = Status::from_code(code).unwrap();
            assert_eq!(status.code(), code);
            assert_eq!(status.success(), success, "code {}", code);
        }
    }

    #[test]
    fn test_json_roundtrip() {
        for &(code, _) in ALL {
            let status = Status::from_code(code).unwrap();
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::json!(code));
            assert_eq!(serde_json::from_value::<Status>(json).unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(Status::from_code(116), None);
        assert!(serde_json::from_value::<Status>(serde_json::json!(999)).is_err());
    }
}
