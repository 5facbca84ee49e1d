//! Pitch/bank/heading packing used by `@` and interim position packets.
//!
//! The 32-bit value holds, least significant bit first: one unused bit, the
//! on-ground flag, a 10-bit unsigned heading and two 10-bit signed fields for
//! bank and pitch. All three angles share the same scale of 1024 units per
//! full circle. Pitch and bank are negated on the wire.

const UNITS_PER_CIRCLE: f64 = 1024.0;
const FIELD_MASK: u32 = 0x3FF;

// Scaling multiplies before dividing so that unpacked values pack back to
// the exact same bits.
fn to_units(degrees: f64) -> f64 {
    degrees * UNITS_PER_CIRCLE / 360.0
}

fn to_degrees(units: f64) -> f64 {
    units * 360.0 / UNITS_PER_CIRCLE
}

/// Attitude decoded from a packed PBH value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pbh {
    pub pitch: f64,
    pub bank: f64,
    pub heading: f64,
    pub on_ground: bool,
}

/// Pack attitude (degrees) into the wire representation
pub fn pack_pbh(pitch: f64, bank: f64, heading: f64, on_ground: bool) -> u32 {
    let pitch = (to_units(-pitch).floor() as i32) as u32 & FIELD_MASK;
    let bank = (to_units(-bank).floor() as i32) as u32 & FIELD_MASK;
    let heading = to_units(heading.rem_euclid(360.0)) as u32 & FIELD_MASK;

    pitch << 22 | bank << 12 | heading << 2 | u32::from(on_ground) << 1
}

/// Unpack a wire PBH value
pub fn unpack_pbh(pbh: u32) -> Pbh {
    Pbh {
        pitch: -to_degrees(sign_extend(pbh >> 22) as f64),
        bank: -to_degrees(sign_extend(pbh >> 12) as f64),
        heading: to_degrees((pbh >> 2 & FIELD_MASK) as f64),
        on_ground: pbh >> 1 & 1 == 1,
    }
}

fn sign_extend(field: u32) -> i32 {
    (((field & FIELD_MASK) << 22) as i32) >> 22
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_value() {
        assert_eq!(pack_pbh(-2.0, 3.0, 280.0, true), 25132146);
    }

    #[test]
    fn test_unpack_reference_value() {
        let pbh = unpack_pbh(25132146);
        assert!((pbh.pitch - -2.0).abs() < 1.0);
        assert!((pbh.bank - 3.0).abs() < 1.0);
        assert!((pbh.heading - 280.0).abs() < 1.0);
        assert!(pbh.on_ground);
    }

    #[test]
    fn test_ranges_survive_packing() {
        for pitch in -90..90 {
            let pbh = unpack_pbh(pack_pbh(pitch as f64, 0.0, 0.0, true));
            assert!((pbh.pitch - pitch as f64).abs() < 1.0, "pitch {}", pitch);
            assert!(pbh.on_ground);
        }
        for bank in -179..180 {
            let pbh = unpack_pbh(pack_pbh(0.0, bank as f64, 0.0, false));
            assert!((pbh.bank - bank as f64).abs() < 1.0, "bank {}", bank);
            assert!(!pbh.on_ground);
        }
        for heading in 0..360 {
            let pbh = unpack_pbh(pack_pbh(0.0, 0.0, heading as f64, false));
            assert!(pbh.heading >= 0.0 && pbh.heading < 360.0);
            assert!((pbh.heading - heading as f64).abs() < 1.0, "heading {}", heading);
        }
    }

    #[test]
    fn test_unpacked_values_pack_to_same_bits() {
        for packed in [25132146u32, 0, 0xFFFF_FFFC, 0x8020_0802] {
            let pbh = unpack_pbh(packed);
            assert_eq!(pack_pbh(pbh.pitch, pbh.bank, pbh.heading, pbh.on_ground), packed);
        }
    }
}
