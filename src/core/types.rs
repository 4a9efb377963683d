//! Typed GNSS records produced by the decoder and published by the relay
//!
//! Field names on the wire are PascalCase and must stay stable: downstream
//! consumers key on `Valid`, `NSHemi`, `Slmsg[i].SN` and friends.

use crate::core::constants::MAX_SATELLITE_COUNT;
use serde::Serialize;

/// One tracked satellite of the primary (GPS) constellation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SatelliteEntry {
    /// Satellite catalog number
    pub num: i8,
    /// Elevation in degrees
    pub eledeg: i8,
    /// Azimuth in degrees
    pub azideg: i32,
    /// Signal-to-noise ratio
    #[serde(rename = "SN")]
    pub sn: i8,
}

/// One tracked satellite of the secondary (BeiDou) constellation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BeidouSatelliteEntry {
    pub beidou_num: i8,
    pub beidou_eledeg: i8,
    pub beidou_azideg: i32,
    #[serde(rename = "BeidouSN")]
    pub beidou_sn: i8,
}

impl From<SatelliteEntry> for BeidouSatelliteEntry {
    fn from(entry: SatelliteEntry) -> Self {
        Self {
            beidou_num: entry.num,
            beidou_eledeg: entry.eledeg,
            beidou_azideg: entry.azideg,
            beidou_sn: entry.sn,
        }
    }
}

/// UTC time of the fix as reported by the positioning service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UtcTimestamp {
    pub year: i32,
    /// Month (1-12)
    pub month: i8,
    /// Day of month (1-31)
    pub date: i8,
    pub hour: i8,
    pub min: i8,
    pub sec: i8,
}

impl UtcTimestamp {
    pub fn new(year: i32, month: i8, date: i8, hour: i8, min: i8, sec: i8) -> Self {
        Self { year, month, date, hour, min, sec }
    }
}

/// Complete, normalized positioning record
///
/// Every field has a zero default; a record decoded from an empty reply is
/// equal to `FullPositionRecord::default()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FullPositionRecord {
    /// Validity flag for the fix
    pub valid: i32,
    /// Milliseconds since the last successful lock
    pub last_lock_time_ms: u64,
    /// GPS satellites in view
    pub svnum: u8,
    /// BeiDou satellites in view
    pub beidou_svnum: u8,
    /// North/South hemisphere indicator
    pub ns_hemi: String,
    /// East/West hemisphere indicator
    pub ew_hemi: String,
    pub latitude: f64,
    pub longitude: f64,
    /// GPS status
    pub gpssta: u8,
    /// Number of satellites used in the position solution
    pub posslnum: u8,
    pub fixmode: u8,
    pub pdop: f64,
    pub hdop: f64,
    pub vdop: f64,
    /// Altitude above sea level
    pub altitude: f64,
    /// Ground speed
    pub speed: f64,
    pub utc: UtcTimestamp,
    pub slmsg: [SatelliteEntry; MAX_SATELLITE_COUNT],
    pub beidou_slmsg: [BeidouSatelliteEntry; MAX_SATELLITE_COUNT],
    /// Position solution levels
    pub possl: [u8; MAX_SATELLITE_COUNT],
}

impl FullPositionRecord {
    /// Number of populated GPS satellite slots
    pub fn tracked_satellites(&self) -> usize {
        self.slmsg.iter().filter(|s| **s != SatelliteEntry::default()).count()
    }
}

/// Projection of [`FullPositionRecord`] sent to the broker
///
/// Dilution of precision and fix quality fields are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishableRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub valid: i32,
    pub last_lock_time_ms: u64,
    pub svnum: u8,
    pub beidou_svnum: u8,
    #[serde(rename = "NSHemi")]
    pub ns_hemi: String,
    #[serde(rename = "EWHemi")]
    pub ew_hemi: String,
    pub altitude: f64,
    pub utc: UtcTimestamp,
    pub slmsg: [SatelliteEntry; MAX_SATELLITE_COUNT],
    pub beidou_slmsg: [BeidouSatelliteEntry; MAX_SATELLITE_COUNT],
    pub possl: [u8; MAX_SATELLITE_COUNT],
}

impl From<&FullPositionRecord> for PublishableRecord {
    fn from(record: &FullPositionRecord) -> Self {
        Self {
            latitude: record.latitude,
            longitude: record.longitude,
            speed: record.speed,
            valid: record.valid,
            last_lock_time_ms: record.last_lock_time_ms,
            svnum: record.svnum,
            beidou_svnum: record.beidou_svnum,
            ns_hemi: record.ns_hemi.clone(),
            ew_hemi: record.ew_hemi.clone(),
            altitude: record.altitude,
            utc: record.utc,
            slmsg: record.slmsg,
            beidou_slmsg: record.beidou_slmsg,
            possl: record.possl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satellite_arrays_use_shared_slot_count() {
        let record = FullPositionRecord::default();
        assert_eq!(MAX_SATELLITE_COUNT, 12);
        assert_eq!(record.slmsg.len(), MAX_SATELLITE_COUNT);
        assert_eq!(record.beidou_slmsg.len(), MAX_SATELLITE_COUNT);
        assert_eq!(record.possl.len(), MAX_SATELLITE_COUNT);
    }

    #[test]
    fn test_wire_field_names() {
        let mut record = FullPositionRecord::default();
        record.ns_hemi = "N".to_string();
        record.slmsg[0] = SatelliteEntry { num: 7, eledeg: 40, azideg: 270, sn: 33 };
        record.beidou_slmsg[0] = SatelliteEntry { num: 3, eledeg: 12, azideg: 90, sn: 21 }.into();

        let json = serde_json::to_value(PublishableRecord::from(&record)).unwrap();
        assert_eq!(json["NSHemi"], "N");
        assert_eq!(json["EWHemi"], "");
        assert_eq!(json["LastLockTimeMs"], 0);
        assert_eq!(json["Utc"]["Date"], 0);
        assert_eq!(json["Slmsg"][0]["SN"], 33);
        assert_eq!(json["Slmsg"][0]["Azideg"], 270);
        assert_eq!(json["BeidouSlmsg"][0]["BeidouSN"], 21);
        assert_eq!(json["BeidouSlmsg"][0]["BeidouNum"], 3);
    }

    #[test]
    fn test_projection_omits_quality_fields() {
        let mut record = FullPositionRecord::default();
        record.pdop = 1.2;
        record.fixmode = 3;

        let json = serde_json::to_value(PublishableRecord::from(&record)).unwrap();
        let object = json.as_object().unwrap();
        for omitted in ["Pdop", "Hdop", "Vdop", "Gpssta", "Posslnum", "Fixmode"] {
            assert!(!object.contains_key(omitted), "{} should not be published", omitted);
        }
        assert_eq!(object.len(), 14);
    }

    #[test]
    fn test_tracked_satellites() {
        let mut record = FullPositionRecord::default();
        assert_eq!(record.tracked_satellites(), 0);
        record.slmsg[2].num = 9;
        assert_eq!(record.tracked_satellites(), 1);
    }
}
