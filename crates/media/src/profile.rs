//! Named upload profiles.

use std::fmt;

const MIB: usize = 1024 * 1024;

/// Upload profile selecting the size cap, destination folder, and the
/// transformation the host applies on ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaProfile {
    /// Project cover images: 800x600 centred fill crop.
    Project,
    /// Client portraits: 400x400 face-centred square crop.
    Client,
}

impl MediaProfile {
    /// Maximum accepted upload size in bytes.
    pub fn max_bytes(self) -> usize {
        match self {
            Self::Project => 10 * MIB,
            Self::Client => 5 * MIB,
        }
    }

    /// Size cap in whole MiB, for messages.
    pub fn max_mib(self) -> usize {
        self.max_bytes() / MIB
    }

    /// Folder the host stores the object under.
    pub fn folder(self) -> &'static str {
        match self {
            Self::Project => "flipr-assignment/Projects",
            Self::Client => "flipr-assignment/Clients",
        }
    }

    /// Incoming transformation in the host's URL syntax.
    pub fn transformation(self) -> &'static str {
        match self {
            Self::Project => "c_fill,g_center,h_600,q_auto,w_800,f_auto",
            Self::Client => "c_fill,g_face,h_400,q_auto,w_400",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for MediaProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
