//! Pan/tilt/zoom control messages.

use super::convert::fixed_member;
use super::message::{Message, Reply, Request, Session};
use super::model::*;
use super::status::Status;
use serde::{Deserialize, Serialize};

/// The camera control buttons.
///
/// `ZoomTile` is the vendor's spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PtzButton {
    /// Open the on screen menu.
    Menu,
    /// Pan right.
    #[serde(rename = "DirectionRight")]
    Right,
    /// Pan right and tilt up.
    #[serde(rename = "DirectionRightUp")]
    RightUp,
    /// Tilt up.
    #[serde(rename = "DirectionUp")]
    Up,
    /// Pan left and tilt up.
    #[serde(rename = "DirectionLeftUp")]
    LeftUp,
    /// Pan left.
    #[serde(rename = "DirectionLeft")]
    Left,
    /// Pan left and tilt down.
    #[serde(rename = "DirectionLeftDown")]
    LeftDown,
    /// Tilt down.
    #[serde(rename = "DirectionDown")]
    Down,
    /// Pan right and tilt down.
    #[serde(rename = "DirectionRightDown")]
    RightDown,
    /// Zoom in.
    #[serde(rename = "ZoomTile")]
    ZoomIn,
    /// Zoom out.
    #[serde(rename = "ZoomWide")]
    ZoomOut,
    /// Focus nearer.
    FocusNear,
    /// Focus farther.
    FocusFar,
    /// Open the iris.
    #[serde(rename = "IrisLarge")]
    IrisOpen,
    /// Close the iris.
    #[serde(rename = "IrisSmall")]
    IrisClose,
    /// Stop automatic panning.
    #[serde(rename = "AutoPanOff")]
    Still,
    /// Start automatic panning.
    #[serde(rename = "AutoPanOn")]
    Pan,
    /// Move to a stored preset.
    GotoPreset,
    /// Store the current position as a preset.
    SetPreset,
    /// Delete a stored preset.
    ClearPreset,
    /// Start a preset tour.
    StartTour,
    /// End a preset tour.
    EndTour,
}

fixed_member!(
    /// Auxiliary switch block devices expect verbatim.
    PtzAux,
    { "Number": 0, "Status": "On" }
);

fixed_member!(
    /// Menu navigation parameter devices expect verbatim.
    PtzMenu,
    "Enter"
);

fixed_member!(
    /// Region parameter devices expect verbatim.
    PtzPoint,
    { "bottom": 0, "left": 0, "right": 0, "top": 0 }
);

fixed_member!(
    /// Pattern parameter devices expect verbatim.
    PtzPattern,
    "SetBegin"
);

fixed_member!(
    /// Preset slot parameter devices expect verbatim.
    PtzPreset,
    65535
);

fixed_member!(
    /// Movement step parameter devices expect verbatim.
    PtzStep,
    5
);

fixed_member!(
    /// Tour slot parameter devices expect verbatim.
    PtzTour,
    0
);

/// Parameters of a button press. Only the channel varies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PtzParams {
    #[allow(missing_docs)]
    #[serde(rename = "AUX")]
    pub aux: PtzAux,
    /// Camera channel to steer.
    #[serde(rename = "Channel")]
    pub channel: u32,
    #[allow(missing_docs)]
    #[serde(rename = "MenuOpts")]
    pub menu: PtzMenu,
    #[allow(missing_docs)]
    #[serde(rename = "POINT")]
    pub point: PtzPoint,
    #[allow(missing_docs)]
    #[serde(rename = "Pattern")]
    pub pattern: PtzPattern,
    #[allow(missing_docs)]
    #[serde(rename = "Preset")]
    pub preset: PtzPreset,
    #[allow(missing_docs)]
    #[serde(rename = "Step")]
    pub step: PtzStep,
    #[allow(missing_docs)]
    #[serde(rename = "Tour")]
    pub tour: PtzTour,
}

impl PtzParams {
    /// Parameters steering `channel`.
    pub fn new(channel: u32) -> PtzParams {
        PtzParams {
            channel,
            ..PtzParams::default()
        }
    }
}

/// A button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ptz {
    /// Which button.
    #[serde(rename = "Command")]
    pub button: PtzButton,
    /// On which channel.
    #[serde(rename = "Parameter")]
    pub params: PtzParams,
}

fixed_member!(
    /// The `OPPTZControl` command discriminator.
    PtzName,
    "OPPTZControl"
);

fixed_member!(
    /// PTZ replies echo an empty command name.
    EmptyName,
    ""
);

/// Presses a PTZ button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DoPtz {
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// Command discriminator.
    #[serde(rename = "Name")]
    pub command: PtzName,
    /// The button press.
    #[serde(rename = "OPPTZControl")]
    pub ptz: Ptz,
}

impl Message for DoPtz {
    const TYPE: u16 = MSG_ID_PTZ;
}

impl Request for DoPtz {
    type Reply = DoPtzReply;
}

/// Acknowledgement of a [`DoPtz`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DoPtzReply {
    /// Result code.
    #[serde(rename = "Ret")]
    pub status: Status,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// Command name, empty in this direction.
    #[serde(rename = "Name")]
    pub command: EmptyName,
}

impl Message for DoPtzReply {
    const TYPE: u16 = MSG_ID_PTZ_REPLY;
}

impl Reply for DoPtzReply {
    fn status(&self) -> Status {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_wire_form() {
        let json = serde_json::to_value(PtzParams::new(2)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "AUX": { "Number": 0, "Status": "On" },
                "Channel": 2,
                "MenuOpts": "Enter",
                "POINT": { "bottom": 0, "left": 0, "right": 0, "top": 0 },
                "Pattern": "SetBegin",
                "Preset": 65535,
                "Step": 5,
                "Tour": 0,
            })
        );
    }

    #[test]
    fn test_button_names() {
        assert_eq!(
            serde_json::to_value(PtzButton::ZoomIn).unwrap(),
            serde_json::json!("ZoomTile")
        );
        assert_eq!(
            serde_json::to_value(PtzButton::Still).unwrap(),
            serde_json::json!("AutoPanOff")
        );
    }
}
