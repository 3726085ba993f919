//! Backend code tables
//!
//! The backend identifies statuses, professions and ticket categories by
//! small integer codes. Each table parses from either its code or its name
//! (case-insensitive, `-`/`_`/space ignored) so the console can accept both.

use std::fmt;
use std::str::FromStr;

macro_rules! code_table {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident = $code:literal => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Numeric code sent to and received from the backend.
            pub fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Human-readable label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Ok(code) = s.trim().parse::<u8>() {
                    return $name::from_code(code)
                        .ok_or_else(|| format!("unknown {} code {code}", stringify!($name)));
                }
                let wanted = squash(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| squash(v.label()) == wanted)
                    .ok_or_else(|| format!("unknown {}: {s}", stringify!($name)))
            }
        }
    };
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

code_table! {
    /// Worker verification status (`StatusKey` / review `key`).
    WorkerStatus {
        Suspended = 1 => "Suspended",
        Sent = 2 => "Sent",
        Verified = 3 => "Verified",
        Rejected = 4 => "Rejected",
    }
}

code_table! {
    Profession {
        Plumber = 1 => "Plumber",
        Electrician = 2 => "Electrician",
        Sweeper = 3 => "Sweeper",
        Carpenter = 4 => "Carpenter",
        Painter = 5 => "Painter",
        Other = 99 => "Other",
    }
}

code_table! {
    /// Customer support ticket category (`SupportCategory` query parameter).
    SupportCategory {
        Payment = 1 => "Payment",
        Booking = 2 => "Booking",
        AppIssue = 3 => "App Issue",
        Account = 4 => "Account",
        Refund = 5 => "Refund",
        Other = 99 => "Other",
    }
}

code_table! {
    SupportStatus {
        Open = 1 => "Open",
        InProgress = 2 => "In Progress",
        Resolved = 3 => "Resolved",
        Closed = 4 => "Closed",
    }
}
