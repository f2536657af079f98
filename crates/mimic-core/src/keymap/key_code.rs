//! Virtual key code table.
//!
//! [`KeyCode`] mirrors the Windows virtual-key table (`VK_*` in `winuser.h`),
//! using the same numeric values. The same enum is used to request synthetic
//! key presses and to interpret the `vkCode` delivered by a low-level
//! keyboard hook.
//!
//! # Decoding is total
//!
//! Hook payloads can carry any 32-bit value. [`KeyCode::from_raw`] maps every
//! value that is not in the table (unassigned VK slots, negatives, anything
//! above `0xFF`) to [`KeyCode::None`] instead of failing. The lookup is a
//! single index into `RAW_TO_KEY_TABLE`, built at compile time from the
//! variant list below.
//!
//! # Aliases
//!
//! Several names share one code (`Return` and `Enter` are both `0x0D`). Rust
//! enums cannot repeat a discriminant, so the alternative names are associated
//! constants (`KeyCode::RETURN`) and are also accepted by [`str::parse`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a key name does not match any [`KeyCode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key name: {0:?}")]
pub struct KeyCodeParseError(pub String);

macro_rules! key_codes {
    ($( $(#[$meta:meta])* $name:ident = $value:expr, )+) => {
        /// A virtual key code. The discriminant is the Windows VK value.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(u8)]
        pub enum KeyCode {
            $( $(#[$meta])* $name = $value, )+
        }

        impl KeyCode {
            /// Every code in the table, in ascending numeric order.
            pub const ALL: &'static [KeyCode] = &[ $( KeyCode::$name, )+ ];

            /// The canonical name of this code.
            pub const fn name(self) -> &'static str {
                match self {
                    $( KeyCode::$name => stringify!($name), )+
                }
            }
        }
    };
}

key_codes! {
    /// No key; also the decode result for any unlisted value.
    None = 0x00,
    Backspace = 0x08,       // VK_BACK
    Tab = 0x09,             // VK_TAB
    LineFeed = 0x0A,
    Clear = 0x0C,           // VK_CLEAR
    Enter = 0x0D,           // VK_RETURN
    Shift = 0x10,           // VK_SHIFT
    Ctrl = 0x11,            // VK_CONTROL
    Alt = 0x12,             // VK_MENU
    Pause = 0x13,           // VK_PAUSE
    CapsLock = 0x14,        // VK_CAPITAL
    KanaMode = 0x15,        // VK_KANA / VK_HANGUL
    JunjaMode = 0x17,       // VK_JUNJA
    FinalMode = 0x18,       // VK_FINAL
    KanjiMode = 0x19,       // VK_KANJI / VK_HANJA
    Escape = 0x1B,          // VK_ESCAPE
    ImeConvert = 0x1C,      // VK_CONVERT
    ImeNonconvert = 0x1D,   // VK_NONCONVERT
    ImeAccept = 0x1E,       // VK_ACCEPT
    ImeModeChange = 0x1F,   // VK_MODECHANGE
    Space = 0x20,           // VK_SPACE
    PageUp = 0x21,          // VK_PRIOR
    PageDown = 0x22,        // VK_NEXT
    End = 0x23,             // VK_END
    Home = 0x24,            // VK_HOME
    Left = 0x25,            // VK_LEFT
    Up = 0x26,              // VK_UP
    Right = 0x27,           // VK_RIGHT
    Down = 0x28,            // VK_DOWN
    Select = 0x29,          // VK_SELECT
    Print = 0x2A,           // VK_PRINT
    Execute = 0x2B,         // VK_EXECUTE
    PrintScreen = 0x2C,     // VK_SNAPSHOT
    Insert = 0x2D,          // VK_INSERT
    Delete = 0x2E,          // VK_DELETE
    Help = 0x2F,            // VK_HELP
    D0 = 0x30,
    D1 = 0x31,
    D2 = 0x32,
    D3 = 0x33,
    D4 = 0x34,
    D5 = 0x35,
    D6 = 0x36,
    D7 = 0x37,
    D8 = 0x38,
    D9 = 0x39,
    A = 0x41,
    B = 0x42,
    C = 0x43,
    D = 0x44,
    E = 0x45,
    F = 0x46,
    G = 0x47,
    H = 0x48,
    I = 0x49,
    J = 0x4A,
    K = 0x4B,
    L = 0x4C,
    M = 0x4D,
    N = 0x4E,
    O = 0x4F,
    P = 0x50,
    Q = 0x51,
    R = 0x52,
    S = 0x53,
    T = 0x54,
    U = 0x55,
    V = 0x56,
    W = 0x57,
    X = 0x58,
    Y = 0x59,
    Z = 0x5A,
    LWin = 0x5B,            // VK_LWIN
    RWin = 0x5C,            // VK_RWIN
    Apps = 0x5D,            // VK_APPS
    Sleep = 0x5F,           // VK_SLEEP
    NumPad0 = 0x60,
    NumPad1 = 0x61,
    NumPad2 = 0x62,
    NumPad3 = 0x63,
    NumPad4 = 0x64,
    NumPad5 = 0x65,
    NumPad6 = 0x66,
    NumPad7 = 0x67,
    NumPad8 = 0x68,
    NumPad9 = 0x69,
    Multiply = 0x6A,        // VK_MULTIPLY
    Add = 0x6B,             // VK_ADD
    Separator = 0x6C,       // VK_SEPARATOR
    Subtract = 0x6D,        // VK_SUBTRACT
    Decimal = 0x6E,         // VK_DECIMAL
    Divide = 0x6F,          // VK_DIVIDE
    F1 = 0x70,
    F2 = 0x71,
    F3 = 0x72,
    F4 = 0x73,
    F5 = 0x74,
    F6 = 0x75,
    F7 = 0x76,
    F8 = 0x77,
    F9 = 0x78,
    F10 = 0x79,
    F11 = 0x7A,
    F12 = 0x7B,
    F13 = 0x7C,
    F14 = 0x7D,
    F15 = 0x7E,
    F16 = 0x7F,
    F17 = 0x80,
    F18 = 0x81,
    F19 = 0x82,
    F20 = 0x83,
    F21 = 0x84,
    F22 = 0x85,
    F23 = 0x86,
    F24 = 0x87,
    NumLock = 0x90,         // VK_NUMLOCK
    Scroll = 0x91,          // VK_SCROLL
    LShift = 0xA0,          // VK_LSHIFT
    RShift = 0xA1,          // VK_RSHIFT
    LCtrl = 0xA2,           // VK_LCONTROL
    RCtrl = 0xA3,           // VK_RCONTROL
    LAlt = 0xA4,            // VK_LMENU
    RAlt = 0xA5,            // VK_RMENU
    BrowserBack = 0xA6,
    BrowserForward = 0xA7,
    BrowserRefresh = 0xA8,
    BrowserStop = 0xA9,
    BrowserSearch = 0xAA,
    BrowserFavorites = 0xAB,
    BrowserHome = 0xAC,
    VolumeMute = 0xAD,
    VolumeDown = 0xAE,
    VolumeUp = 0xAF,
    MediaNextTrack = 0xB0,
    MediaPreviousTrack = 0xB1,
    MediaStop = 0xB2,
    MediaPlayPause = 0xB3,
    LaunchMail = 0xB4,
    SelectMedia = 0xB5,
    LaunchApplication1 = 0xB6,
    LaunchApplication2 = 0xB7,
    OemSemicolon = 0xBA,    // VK_OEM_1
    OemPlus = 0xBB,         // VK_OEM_PLUS
    OemComma = 0xBC,        // VK_OEM_COMMA
    OemMinus = 0xBD,        // VK_OEM_MINUS
    OemPeriod = 0xBE,       // VK_OEM_PERIOD
    OemQuestion = 0xBF,     // VK_OEM_2
    OemTilde = 0xC0,        // VK_OEM_3
    OemOpenBrackets = 0xDB, // VK_OEM_4
    OemPipe = 0xDC,         // VK_OEM_5
    OemCloseBrackets = 0xDD, // VK_OEM_6
    OemQuotes = 0xDE,       // VK_OEM_7
    Oem8 = 0xDF,            // VK_OEM_8
    OemBackslash = 0xE2,    // VK_OEM_102
    ProcessKey = 0xE5,      // VK_PROCESSKEY
    Packet = 0xE7,          // VK_PACKET
    Attn = 0xF6,            // VK_ATTN
    Crsel = 0xF7,           // VK_CRSEL
    Exsel = 0xF8,           // VK_EXSEL
    EraseEof = 0xF9,        // VK_EREOF
    Play = 0xFA,            // VK_PLAY
    Zoom = 0xFB,            // VK_ZOOM
    NoName = 0xFC,          // VK_NONAME
    Pa1 = 0xFD,             // VK_PA1
    OemClear = 0xFE,        // VK_OEM_CLEAR
}

/// Raw value → [`KeyCode`] lookup indexed by VK value (0x00–0xFF).
///
/// Slots without a named code hold [`KeyCode::None`].
const RAW_TO_KEY_TABLE: [KeyCode; 256] = {
    let mut table = [KeyCode::None; 256];
    let mut i = 0;
    while i < KeyCode::ALL.len() {
        let key = KeyCode::ALL[i];
        table[key as usize] = key;
        i += 1;
    }
    table
};

/// Alternative names accepted by [`KeyCode::from_str`].
const ALIASES: &[(&str, KeyCode)] = &[
    ("Return", KeyCode::Enter),
    ("HanguelMode", KeyCode::KanaMode),
    ("HangulMode", KeyCode::KanaMode),
    ("HanjaMode", KeyCode::KanjiMode),
    ("Oem1", KeyCode::OemSemicolon),
    ("Oem2", KeyCode::OemQuestion),
    ("Oem3", KeyCode::OemTilde),
    ("Oem4", KeyCode::OemOpenBrackets),
    ("Oem5", KeyCode::OemPipe),
    ("Oem6", KeyCode::OemCloseBrackets),
    ("Oem7", KeyCode::OemQuotes),
    ("Oem102", KeyCode::OemBackslash),
];

impl KeyCode {
    pub const RETURN: KeyCode = KeyCode::Enter;
    pub const HANGUL_MODE: KeyCode = KeyCode::KanaMode;
    pub const HANJA_MODE: KeyCode = KeyCode::KanjiMode;
    pub const OEM_1: KeyCode = KeyCode::OemSemicolon;
    pub const OEM_2: KeyCode = KeyCode::OemQuestion;
    pub const OEM_3: KeyCode = KeyCode::OemTilde;
    pub const OEM_4: KeyCode = KeyCode::OemOpenBrackets;
    pub const OEM_5: KeyCode = KeyCode::OemPipe;
    pub const OEM_6: KeyCode = KeyCode::OemCloseBrackets;
    pub const OEM_7: KeyCode = KeyCode::OemQuotes;
    pub const OEM_102: KeyCode = KeyCode::OemBackslash;

    /// Decodes a raw virtual key value.
    ///
    /// Never fails: values outside the table decode to [`KeyCode::None`].
    pub fn from_raw(raw: i32) -> KeyCode {
        match u8::try_from(raw) {
            Ok(vk) => RAW_TO_KEY_TABLE[vk as usize],
            Err(_) => KeyCode::None,
        }
    }

    /// The numeric VK value.
    pub const fn vk(self) -> u16 {
        self as u16
    }

    /// `true` for every code except the [`KeyCode::None`] sentinel.
    pub const fn is_some(self) -> bool {
        !matches!(self, KeyCode::None)
    }
}

impl Default for KeyCode {
    fn default() -> Self {
        KeyCode::None
    }
}

impl From<u8> for KeyCode {
    fn from(vk: u8) -> Self {
        RAW_TO_KEY_TABLE[vk as usize]
    }
}

impl From<KeyCode> for u16 {
    fn from(key: KeyCode) -> Self {
        key.vk()
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyCode {
    type Err = KeyCodeParseError;

    /// Parses a key name, ignoring ASCII case. Aliases such as `Return` are
    /// accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        KeyCode::ALL
            .iter()
            .copied()
            .find(|key| key.name().eq_ignore_ascii_case(wanted))
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| alias.eq_ignore_ascii_case(wanted))
                    .map(|&(_, key)| key)
            })
            .ok_or_else(|| KeyCodeParseError(s.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_returns_named_code_for_known_value() {
        assert_eq!(KeyCode::from_raw(0x41), KeyCode::A);
        assert_eq!(KeyCode::from_raw(0x0D), KeyCode::Enter);
        assert_eq!(KeyCode::from_raw(0x87), KeyCode::F24);
        assert_eq!(KeyCode::from_raw(0xFE), KeyCode::OemClear);
    }

    #[test]
    fn test_from_raw_returns_none_for_unassigned_slot() {
        // 0x07 and 0x3A are unassigned in the VK table.
        assert_eq!(KeyCode::from_raw(0x07), KeyCode::None);
        assert_eq!(KeyCode::from_raw(0x3A), KeyCode::None);
        assert_eq!(KeyCode::from_raw(0xFF), KeyCode::None);
    }

    #[test]
    fn test_from_raw_returns_none_outside_byte_range() {
        assert_eq!(KeyCode::from_raw(-1), KeyCode::None);
        assert_eq!(KeyCode::from_raw(256), KeyCode::None);
        assert_eq!(KeyCode::from_raw(i32::MAX), KeyCode::None);
    }

    #[test]
    fn test_every_code_decodes_to_itself() {
        for &key in KeyCode::ALL {
            assert_eq!(KeyCode::from_raw(key.vk() as i32), key, "{key} must round-trip");
        }
    }

    #[test]
    fn test_all_is_strictly_ascending() {
        for pair in KeyCode::ALL.windows(2) {
            assert!(pair[0].vk() < pair[1].vk(), "{} before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_aliases_share_value_with_primary_name() {
        assert_eq!(KeyCode::RETURN.vk(), 13);
        assert_eq!(KeyCode::HANGUL_MODE, KeyCode::KanaMode);
        assert_eq!(KeyCode::OEM_102.vk(), 226);
    }

    #[test]
    fn test_parse_is_case_insensitive_and_accepts_aliases() {
        assert_eq!("enter".parse::<KeyCode>(), Ok(KeyCode::Enter));
        assert_eq!("RETURN".parse::<KeyCode>(), Ok(KeyCode::Enter));
        assert_eq!(" f5 ".parse::<KeyCode>(), Ok(KeyCode::F5));
        assert_eq!("oem4".parse::<KeyCode>(), Ok(KeyCode::OemOpenBrackets));
    }

    #[test]
    fn test_parse_unknown_name_is_error() {
        let err = "NotAKey".parse::<KeyCode>().unwrap_err();
        assert_eq!(err, KeyCodeParseError("NotAKey".to_string()));
    }

    #[test]
    fn test_display_uses_canonical_name() {
        assert_eq!(KeyCode::NumPad7.to_string(), "NumPad7");
        assert_eq!(KeyCode::None.to_string(), "None");
    }
}
