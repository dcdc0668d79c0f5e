use log::warn;
use serde::{Deserialize, Serialize};

use super::{Kit, PadConfig, BPM_RANGE};
use crate::{Error, PAD_COUNT};

/// Raw kit as it arrives from presets files or a generator service.
///
/// Nothing here is trusted. Converting into a [`Kit`] applies the ingestion
/// rules:
///
/// - fewer than 8 pads is rejected, more are truncated to the first 8
/// - pad ids are renumbered `0..8` by position
/// - bpm is rounded and clamped into `60..=200`
/// - pattern rows are truncated or padded (all-off) to exactly 8, and must
///   share one non-zero length
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_bpm")]
    pub bpm: f64,
    pub pads: Vec<PadConfig>,
    #[serde(default)]
    pub pattern: Option<Vec<Vec<bool>>>,
}

fn default_bpm() -> f64 {
    120.0
}

impl TryFrom<KitDescriptor> for Kit {
    type Error = Error;

    fn try_from(descriptor: KitDescriptor) -> Result<Self, Self::Error> {
        let KitDescriptor {
            name,
            description,
            bpm,
            mut pads,
            pattern,
        } = descriptor;

        if pads.len() < PAD_COUNT {
            return Err(Error::malformed(format!(
                "kit has {} pads, need {PAD_COUNT}",
                pads.len()
            )));
        }
        if pads.len() > PAD_COUNT {
            warn!(
                "kit {name:?} has {} pads, keeping the first {PAD_COUNT}",
                pads.len()
            );
            pads.truncate(PAD_COUNT);
        }
        for (id, pad) in pads.iter_mut().enumerate() {
            pad.id = id as u8;
        }

        let bpm = normalize_bpm(bpm)?;
        let pattern = pattern.map(normalize_pattern).transpose()?.flatten();

        Ok(Kit::from_parts(name, description, bpm, pads, pattern))
    }
}

fn normalize_bpm(bpm: f64) -> Result<u32, Error> {
    if !bpm.is_finite() {
        return Err(Error::malformed(format!("bpm {bpm} is not a number")));
    }
    let (lo, hi) = (*BPM_RANGE.start(), *BPM_RANGE.end());
    let clamped = bpm.round().clamp(lo as f64, hi as f64) as u32;
    if clamped as f64 != bpm {
        warn!("kit bpm {bpm} adjusted to {clamped}");
    }
    Ok(clamped)
}

/// `Ok(None)` for an empty row list: the kit simply has no pattern.
fn normalize_pattern(mut rows: Vec<Vec<bool>>) -> Result<Option<Vec<Vec<bool>>>, Error> {
    if rows.is_empty() {
        return Ok(None);
    }
    if rows.len() > PAD_COUNT {
        warn!(
            "pattern has {} rows, keeping the first {PAD_COUNT}",
            rows.len()
        );
        rows.truncate(PAD_COUNT);
    }

    let len = rows[0].len();
    if len == 0 {
        return Err(Error::malformed("pattern rows are empty"));
    }
    if let Some(row) = rows.iter().position(|r| r.len() != len) {
        return Err(Error::malformed(format!(
            "pattern row {row} has {} steps, expected {len}",
            rows[row].len()
        )));
    }

    rows.resize(PAD_COUNT, vec![false; len]);
    Ok(Some(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::SoundParams;
    use crate::voices::VoiceType;

    fn pads(n: usize) -> Vec<PadConfig> {
        (0..n)
            .map(|i| {
                PadConfig::new(
                    (i * 10) as u8,
                    format!("P{i}"),
                    "#000000",
                    VoiceType::Synth,
                    SoundParams::default(),
                )
            })
            .collect()
    }

    fn descriptor(pads: Vec<PadConfig>, pattern: Option<Vec<Vec<bool>>>) -> KitDescriptor {
        KitDescriptor {
            name: "test".into(),
            description: String::new(),
            bpm: 120.0,
            pads,
            pattern,
        }
    }

    #[test]
    fn oversized_descriptor_is_trimmed() {
        let mut rows = vec![vec![false; 16]; 9];
        rows[8][0] = true;
        rows[2][3] = true;

        let kit = Kit::try_from(descriptor(pads(10), Some(rows))).unwrap();

        assert_eq!(kit.pads().len(), 8);
        assert_eq!(kit.pattern().map(<[_]>::len), Some(8));
        assert!(kit.pattern().unwrap()[2][3]);
        assert_eq!(kit.pads()[7].label, "P7");
    }

    #[test]
    fn ids_are_renumbered_by_position() {
        let kit = Kit::try_from(descriptor(pads(8), None)).unwrap();
        let ids: Vec<u8> = kit.pads().iter().map(|p| p.id).collect();
        assert_eq!(ids, (0..8).collect::<Vec<u8>>());
    }

    #[test]
    fn too_few_pads_is_malformed() {
        let err = Kit::try_from(descriptor(pads(7), None)).unwrap_err();
        assert!(matches!(err, Error::MalformedKitDescriptor(_)));
    }

    #[test]
    fn short_pattern_is_padded_with_silent_rows() {
        let rows = vec![vec![true; 32]; 3];
        let kit = Kit::try_from(descriptor(pads(8), Some(rows))).unwrap();
        let pattern = kit.pattern().unwrap();

        assert_eq!(pattern.len(), 8);
        assert!(pattern[..3].iter().all(|r| r.iter().all(|&c| c)));
        assert!(pattern[3..].iter().all(|r| r.len() == 32 && r.iter().all(|&c| !c)));
    }

    #[test]
    fn ragged_or_empty_rows_are_malformed() {
        let ragged = vec![vec![false; 16], vec![false; 15]];
        assert!(Kit::try_from(descriptor(pads(8), Some(ragged))).is_err());

        let empty_rows = vec![vec![]; 8];
        assert!(Kit::try_from(descriptor(pads(8), Some(empty_rows))).is_err());
    }

    #[test]
    fn empty_row_list_means_no_pattern() {
        let kit = Kit::try_from(descriptor(pads(8), Some(vec![]))).unwrap();
        assert!(kit.pattern().is_none());
    }

    #[test]
    fn bpm_is_rounded_and_clamped() {
        let mut d = descriptor(pads(8), None);
        d.bpm = 127.6;
        assert_eq!(Kit::try_from(d.clone()).unwrap().bpm(), 128);
        d.bpm = 20.0;
        assert_eq!(Kit::try_from(d.clone()).unwrap().bpm(), 60);
        d.bpm = 999.0;
        assert_eq!(Kit::try_from(d.clone()).unwrap().bpm(), 200);
        d.bpm = f64::NAN;
        assert!(Kit::try_from(d).is_err());
    }

    #[test]
    fn json_errors_map_to_malformed() {
        let err = Kit::from_json(r#"{ "pads": "nope" }"#).unwrap_err();
        assert!(matches!(err, Error::MalformedKitDescriptor(_)));

        let err = Kit::from_json(
            r##"{ "pads": [ { "id": 0, "label": "X", "color": "#fff",
                  "soundType": "cowbell", "params": { "frequency": 1, "decay": 1 } } ] }"##,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedKitDescriptor(_)));
    }
}
