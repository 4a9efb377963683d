//! Decoder from raw service records into [`FullPositionRecord`]
//!
//! Decoding never fails. The service legitimately omits fields before the
//! first lock (DOP values, satellite lists), so anything missing or mis-shaped
//! is left at its zero value.
//!
//! Recognized keys:
//!
//! | key | target |
//! |---|---|
//! | `valid` | `valid` (i32) |
//! | `last_lock_time_ms` | `last_lock_time_ms` (u64) |
//! | `svnum`, `beidou_svnum`, `gpssta`, `posslnum`, `fixmode` | u8 fields |
//! | `nshemi`, `ewhemi` | hemisphere strings |
//! | `latitude`, `longitude`, `pdop`, `hdop`, `vdop`, `altitude`, `speed` | f64 fields |
//! | `utc` | `[year, month, day, hour, minute, second]` |
//! | `slmsg`, `beidou_slmsg` | `[[num, elevation, azimuth, snr], ...]` |
//! | `possl` | `[level, ...]` |

use crate::core::{
    BeidouSatelliteEntry, FullPositionRecord, SatelliteEntry, UtcTimestamp, MAX_SATELLITE_COUNT,
    SATELLITE_TUPLE_LEN, UTC_FIELD_COUNT,
};
use crate::processing::coerce::{to_f64, to_i32, to_i8, to_text, to_u64, to_u8};
use crate::source::{RawRecord, RawValue};

/// Decode one service reply
pub fn decode(raw: &RawRecord) -> FullPositionRecord {
    let mut record = FullPositionRecord::default();

    if let Some(v) = raw.get("valid") {
        record.valid = to_i32(v);
    }
    if let Some(v) = raw.get("last_lock_time_ms") {
        record.last_lock_time_ms = to_u64(v);
    }
    if let Some(v) = raw.get("svnum") {
        record.svnum = to_u8(v);
    }
    if let Some(v) = raw.get("beidou_svnum") {
        record.beidou_svnum = to_u8(v);
    }
    if let Some(v) = raw.get("nshemi") {
        record.ns_hemi = to_text(v);
    }
    if let Some(v) = raw.get("ewhemi") {
        record.ew_hemi = to_text(v);
    }
    if let Some(v) = raw.get("gpssta") {
        record.gpssta = to_u8(v);
    }
    if let Some(v) = raw.get("posslnum") {
        record.posslnum = to_u8(v);
    }
    if let Some(v) = raw.get("fixmode") {
        record.fixmode = to_u8(v);
    }

    record.latitude = float_field(raw, "latitude");
    record.longitude = float_field(raw, "longitude");
    record.pdop = float_field(raw, "pdop");
    record.hdop = float_field(raw, "hdop");
    record.vdop = float_field(raw, "vdop");
    record.altitude = float_field(raw, "altitude");
    record.speed = float_field(raw, "speed");

    if let Some(utc) = raw.get("utc").and_then(decode_utc) {
        record.utc = utc;
    }
    if let Some(v) = raw.get("slmsg") {
        record.slmsg = decode_constellation(v);
    }
    if let Some(v) = raw.get("beidou_slmsg") {
        record.beidou_slmsg = decode_constellation(v).map(BeidouSatelliteEntry::from);
    }
    if let Some(levels) = raw.get("possl").and_then(RawValue::as_seq) {
        for (slot, level) in record.possl.iter_mut().zip(levels) {
            *slot = to_u8(level);
        }
    }

    record
}

/// Missing or non-numeric values read as `0.0`
fn float_field(raw: &RawRecord, key: &str) -> f64 {
    raw.get(key).and_then(|v| to_f64(v).ok()).unwrap_or_default()
}

fn decode_utc(value: &RawValue) -> Option<UtcTimestamp> {
    let fields = value.as_seq()?;
    if fields.len() != UTC_FIELD_COUNT {
        return None;
    }

    Some(UtcTimestamp {
        year: to_i32(&fields[0]),
        month: to_i8(&fields[1]),
        date: to_i8(&fields[2]),
        hour: to_i8(&fields[3]),
        min: to_i8(&fields[4]),
        sec: to_i8(&fields[5]),
    })
}

fn decode_satellite(value: &RawValue) -> Option<SatelliteEntry> {
    let tuple = value.as_seq()?;
    if tuple.len() != SATELLITE_TUPLE_LEN {
        return None;
    }

    Some(SatelliteEntry {
        num: to_i8(&tuple[0]),
        eledeg: to_i8(&tuple[1]),
        azideg: to_i32(&tuple[2]),
        sn: to_i8(&tuple[3]),
    })
}

/// Fill up to [`MAX_SATELLITE_COUNT`] slots; malformed tuples leave their slot empty
fn decode_constellation(value: &RawValue) -> [SatelliteEntry; MAX_SATELLITE_COUNT] {
    let mut slots = [SatelliteEntry::default(); MAX_SATELLITE_COUNT];

    if let Some(entries) = value.as_seq() {
        for (slot, entry) in slots.iter_mut().zip(entries) {
            if let Some(satellite) = decode_satellite(entry) {
                *slot = satellite;
            }
        }
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn satellite(num: i32, ele: i32, azi: i32, snr: i32) -> Vec<i32> {
        vec![num, ele, azi, snr]
    }

    #[test]
    fn test_empty_record_decodes_to_default() {
        assert_eq!(decode(&RawRecord::new()), FullPositionRecord::default());
    }

    #[test]
    fn test_scalar_fields() {
        let raw = RawRecord::new()
            .with("valid", 1i32)
            .with("last_lock_time_ms", 1_500u64)
            .with("svnum", 9u8)
            .with("beidou_svnum", 4u8)
            .with("nshemi", "N")
            .with("ewhemi", "W")
            .with("latitude", 51.5)
            .with("longitude", "-0.12")
            .with("gpssta", 1u8)
            .with("posslnum", 7u8)
            .with("fixmode", 3u8)
            .with("pdop", 1.8)
            .with("hdop", 0.9)
            .with("vdop", 1.5)
            .with("altitude", 35i32)
            .with("speed", 0.4);

        let record = decode(&raw);
        assert_eq!(record.valid, 1);
        assert_eq!(record.last_lock_time_ms, 1_500);
        assert_eq!(record.svnum, 9);
        assert_eq!(record.beidou_svnum, 4);
        assert_eq!(record.ns_hemi, "N");
        assert_eq!(record.ew_hemi, "W");
        assert_eq!(record.latitude, 51.5);
        assert_eq!(record.longitude, -0.12);
        assert_eq!((record.gpssta, record.posslnum, record.fixmode), (1, 7, 3));
        assert_eq!((record.pdop, record.hdop, record.vdop), (1.8, 0.9, 1.5));
        assert_eq!(record.altitude, 35.0);
        assert_eq!(record.speed, 0.4);
    }

    #[test]
    fn test_mistyped_scalars_stay_default() {
        let raw = RawRecord::new()
            .with("valid", "yes")
            .with("nshemi", 1u8)
            .with("latitude", "unknown")
            .with("hdop", RawValue::Unsupported("bool"));

        assert_eq!(decode(&raw), FullPositionRecord::default());
    }

    #[test]
    fn test_utc_block() {
        let raw = RawRecord::new().with("utc", vec![2024i32, 6, 15, 10, 30, 0]);
        assert_eq!(decode(&raw).utc, UtcTimestamp::new(2024, 6, 15, 10, 30, 0));

        let raw = RawRecord::new().with("utc", vec![2024i32, 6]);
        assert_eq!(decode(&raw).utc, UtcTimestamp::default());

        let raw = RawRecord::new().with("utc", 2024i32);
        assert_eq!(decode(&raw).utc, UtcTimestamp::default());
    }

    #[test]
    fn test_short_satellite_list_keeps_default_tail() {
        let raw = RawRecord::new().with(
            "slmsg",
            vec![satellite(5, 45, 180, 38), satellite(12, 20, 75, 29)],
        );

        let record = decode(&raw);
        assert_eq!(record.slmsg.len(), MAX_SATELLITE_COUNT);
        assert_eq!(record.slmsg[0], SatelliteEntry { num: 5, eledeg: 45, azideg: 180, sn: 38 });
        assert_eq!(record.slmsg[1].num, 12);
        assert!(record.slmsg[2..].iter().all(|s| *s == SatelliteEntry::default()));
    }

    #[test]
    fn test_long_satellite_list_is_truncated() {
        let entries: Vec<Vec<i32>> = (1..=20).map(|n| satellite(n, 10, 100, 30)).collect();
        let raw = RawRecord::new()
            .with("slmsg", entries.clone())
            .with("beidou_slmsg", entries)
            .with("possl", (1..=20u8).collect::<Vec<u8>>());

        let record = decode(&raw);
        assert_eq!(record.slmsg.len(), MAX_SATELLITE_COUNT);
        assert_eq!(record.slmsg[MAX_SATELLITE_COUNT - 1].num, 12);
        assert_eq!(record.beidou_slmsg[MAX_SATELLITE_COUNT - 1].beidou_num, 12);
        assert_eq!(record.possl.len(), MAX_SATELLITE_COUNT);
        assert_eq!(record.possl[MAX_SATELLITE_COUNT - 1], 12);
    }

    #[test]
    fn test_malformed_tuple_only_clears_its_slot() {
        let raw = RawRecord::new().with(
            "slmsg",
            RawValue::Seq(vec![
                satellite(3, 60, 45, 40).into(),
                vec![4i32, 61, 46].into(),
                RawValue::I32(9),
                satellite(6, 15, 300, 22).into(),
            ]),
        );

        let record = decode(&raw);
        assert_eq!(record.slmsg[0].num, 3);
        assert_eq!(record.slmsg[1], SatelliteEntry::default());
        assert_eq!(record.slmsg[2], SatelliteEntry::default());
        assert_eq!(record.slmsg[3], SatelliteEntry { num: 6, eledeg: 15, azideg: 300, sn: 22 });
    }

    #[test]
    fn test_beidou_constellation_is_independent() {
        let raw = RawRecord::new().with("beidou_slmsg", vec![satellite(21, 33, 210, 27)]);

        let record = decode(&raw);
        assert_eq!(
            record.beidou_slmsg[0],
            BeidouSatelliteEntry { beidou_num: 21, beidou_eledeg: 33, beidou_azideg: 210, beidou_sn: 27 }
        );
        assert_eq!(record.slmsg[0], SatelliteEntry::default());
    }

    #[test]
    fn test_mixed_width_satellite_values() {
        let tuple = RawValue::Seq(vec![
            RawValue::U8(14),
            RawValue::I16(52),
            RawValue::U16(301),
            RawValue::U32(41),
        ]);
        let raw = RawRecord::new().with("slmsg", RawValue::Seq(vec![tuple]));

        assert_eq!(decode(&raw).slmsg[0], SatelliteEntry { num: 14, eledeg: 52, azideg: 301, sn: 41 });
    }

    #[test]
    fn test_possl_levels() {
        let raw = RawRecord::new().with("possl", vec![1u8, 0, 2]);

        let record = decode(&raw);
        assert_eq!(&record.possl[..4], &[1, 0, 2, 0]);
    }
}
