//! GATT table of the posture monitor
//!
//! Three services and ten characteristics with the 128-bit UUIDs deployed
//! devices advertise.

use std::fmt;

/// Primary services, in advertising order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Raw coordinates of both sensors
    Control,
    /// Calibration and the three deltas
    Delta,
    /// Warning flags
    Warning,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Control, Service::Delta, Service::Warning];

    pub const fn uuid(self) -> &'static str {
        match self {
            Service::Control => "5e28d7d9-ca4b-4515-ad38-abc65b550b82",
            Service::Delta => "5e0a58c4-7c3a-4383-a6de-5dd61980defc",
            Service::Warning => "9e05cc19-a99e-46cf-9021-fa50cecb34bf",
        }
    }

    /// Characteristics hosted by this service
    pub fn characteristics(self) -> impl Iterator<Item = Characteristic> {
        Characteristic::ALL
            .into_iter()
            .filter(move |c| c.service() == self)
    }
}

/// Client access to a characteristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// Every characteristic in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    CoordinatesFirst,
    CoordinatesSecond,
    Calibrate,
    DeltaLean,
    DeltaCompression,
    DeltaTilt,
    WarningTime,
    WarningLean,
    WarningCompression,
    WarningTilt,
}

impl Characteristic {
    pub const ALL: [Characteristic; 10] = [
        Characteristic::CoordinatesFirst,
        Characteristic::CoordinatesSecond,
        Characteristic::Calibrate,
        Characteristic::DeltaLean,
        Characteristic::DeltaCompression,
        Characteristic::DeltaTilt,
        Characteristic::WarningTime,
        Characteristic::WarningLean,
        Characteristic::WarningCompression,
        Characteristic::WarningTilt,
    ];

    pub const fn uuid(self) -> &'static str {
        match self {
            Characteristic::CoordinatesFirst => "bf902c6d-088a-4524-8cda-59708437da8f",
            Characteristic::CoordinatesSecond => "c2e2a8d7-5795-4de1-8fee-537b26ae6843",
            Characteristic::Calibrate => "7176d92d-0af4-42f2-949a-fd34188800de",
            Characteristic::DeltaLean => "fa79718c-e7f8-435b-b9b6-21f309a485e5",
            Characteristic::DeltaCompression => "4e92962b-ff6e-4f42-8e76-f0e7fdd4fb82",
            Characteristic::DeltaTilt => "531f584f-6566-4789-9962-0bdcbe1cd90c",
            Characteristic::WarningTime => "332898e4-6581-4249-97e1-9cc9db963e58",
            Characteristic::WarningLean => "fe8c6f2f-92b2-4fee-a2bd-ebb6165180e0",
            Characteristic::WarningCompression => "4e17ce99-53b2-4f68-8590-96654d05f841",
            Characteristic::WarningTilt => "3c8d0834-485c-41f6-bdf3-9f7704922ac7",
        }
    }

    pub const fn service(self) -> Service {
        match self {
            Characteristic::CoordinatesFirst | Characteristic::CoordinatesSecond => Service::Control,
            Characteristic::Calibrate
            | Characteristic::DeltaLean
            | Characteristic::DeltaCompression
            | Characteristic::DeltaTilt => Service::Delta,
            Characteristic::WarningTime
            | Characteristic::WarningLean
            | Characteristic::WarningCompression
            | Characteristic::WarningTilt => Service::Warning,
        }
    }

    pub const fn access(self) -> Access {
        match self {
            Characteristic::Calibrate => Access::Write,
            _ => Access::Read,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Characteristic::CoordinatesFirst => "coordinates_first",
            Characteristic::CoordinatesSecond => "coordinates_second",
            Characteristic::Calibrate => "calibrate",
            Characteristic::DeltaLean => "delta_lean",
            Characteristic::DeltaCompression => "delta_compression",
            Characteristic::DeltaTilt => "delta_tilt",
            Characteristic::WarningTime => "warning_time",
            Characteristic::WarningLean => "warning_lean",
            Characteristic::WarningCompression => "warning_compression",
            Characteristic::WarningTilt => "warning_tilt",
        }
    }

    /// Look up by UUID, ignoring case
    pub fn from_uuid(uuid: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.uuid().eq_ignore_ascii_case(uuid))
    }

    pub(crate) const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
