//! Status helper enums mapping to SMALLSERIAL/SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Generation job execution status.
    JobStatus {
        Queued = 1,
        Running = 2,
        Done = 3,
        Failed = 4,
    }
}

define_status_enum! {
    /// Episode lifecycle status.
    ///
    /// `Done` is the generated-but-unpublished resting state; `Published`
    /// is reached only by explicit activation and returns to `Done` on
    /// deactivation.
    EpisodeStatus {
        Draft = 1,
        Queued = 2,
        Running = 3,
        Done = 4,
        Failed = 5,
        Published = 6,
    }
}
