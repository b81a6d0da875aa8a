use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use encoding_rs::Encoding;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::rng::{global, RandomSource, SeededSource};
use crate::{DiceSet, Die, DifficultyClass, RollOptions, RollSet, Value};

/// A roll described as data, e.g. loaded from a preset file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RollRequest {
    /// Notation terms summed together; options shape the first one.
    pub dice: Vec<String>,
    pub advantage: bool,
    pub disadvantage: bool,
    pub critical_hit: Option<i32>,
    pub critical_miss: Option<i32>,
    pub allow_criticals: bool,
    /// Make every die lucky.
    pub lucky: bool,
    pub dc: Option<i32>,
    pub seed: Option<u64>,
    pub repeat: Option<u32>,
}

impl RollRequest {
    pub fn options(&self) -> RollOptions {
        let mut opts = RollOptions::new();
        if self.advantage {
            opts = opts.advantage();
        }
        if self.disadvantage {
            opts = opts.disadvantage();
        }
        if let Some(hit) = self.critical_hit {
            opts = opts.critical_hit(hit);
        }
        if let Some(miss) = self.critical_miss {
            opts = opts.critical_miss(miss);
        }
        if self.allow_criticals {
            opts = opts.allow_criticals();
        }
        opts
    }

    pub fn dice_set(&self) -> Result<DiceSet> {
        if self.dice.is_empty() {
            bail!("roll request has no dice");
        }
        self.dice
            .iter()
            .map(|term| -> Result<Die> {
                let die = Die::try_parse(term)
                    .with_context(|| format!("invalid dice notation: {}", term))?;
                Ok(if self.lucky { die.with_luck() } else { die })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RollReport {
    pub expression: String,
    pub dc: Option<i32>,
    pub rolls: Vec<RollLine>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RollLine {
    pub text: String,
    pub value: i32,
    pub critical_hit: bool,
    pub critical_miss: bool,
    pub advantage: bool,
    pub disadvantage: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
}

impl RollLine {
    fn from_roll(rolled: &RollSet, dc: Option<DifficultyClass>) -> Self {
        Self {
            text: rolled.to_string(),
            value: rolled.value(),
            critical_hit: rolled.is_critical_hit(),
            critical_miss: rolled.is_critical_miss(),
            advantage: rolled.rolled_with_advantage(),
            disadvantage: rolled.rolled_with_disadvantage(),
            passed: dc.map(|dc| dc.check(rolled)),
        }
    }
}

/// Roll a request `repeat` times (at least once). A `seed` makes the whole
/// report reproducible; otherwise the process-wide source is used.
pub fn evaluate_request(req: &RollRequest) -> Result<RollReport> {
    let set = req.dice_set()?;
    let opts = req.options();
    let dc = req.dc.map(DifficultyClass::new);
    let seeded;
    let rng: &dyn RandomSource = match req.seed {
        Some(seed) => {
            seeded = SeededSource::from_seed(seed);
            &seeded
        }
        None => global(),
    };

    let times = req.repeat.unwrap_or(1).max(1);
    let rolls = (0..times)
        .map(|_| RollLine::from_roll(&set.roll_with(opts, rng), dc))
        .collect::<Vec<_>>();
    tracing::debug!(expression = %set, times, "evaluated roll request");

    Ok(RollReport {
        expression: set.to_string(),
        dc: req.dc,
        rolls,
    })
}

/// Named requests, kept in file order.
pub type Presets = IndexMap<String, RollRequest>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetFormat {
    Json,
    Yaml,
}

impl PresetFormat {
    /// `.json` files are JSON; anything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => PresetFormat::Json,
            _ => PresetFormat::Yaml,
        }
    }
}

pub fn parse_presets(text: &str, format: PresetFormat) -> Result<Presets> {
    let presets = match format {
        PresetFormat::Json => serde_json::from_str(text).context("failed to parse presets JSON")?,
        PresetFormat::Yaml => serde_yaml::from_str(text).context("failed to parse presets YAML")?,
    };
    Ok(presets)
}

/// Decode file bytes, honouring a UTF-8 or UTF-16 byte-order mark.
pub fn decode_text(bytes: Vec<u8>) -> Result<String> {
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

pub fn load_presets(path: &Path) -> Result<Presets> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read presets: {}", path.display()))?;
    let text = decode_text(bytes)?;
    parse_presets(&text, PresetFormat::from_path(path))
        .with_context(|| format!("in presets file: {}", path.display()))
}

/// Case-insensitive lookup.
pub fn find_preset<'a>(presets: &'a Presets, name: &str) -> Option<&'a RollRequest> {
    presets
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(dice: &[&str]) -> RollRequest {
        RollRequest {
            dice: dice.iter().map(|s| s.to_string()).collect(),
            seed: Some(2025),
            ..Default::default()
        }
    }

    #[test]
    fn empty_request_is_rejected() {
        let err = evaluate_request(&RollRequest::default()).unwrap_err();
        assert!(err.to_string().contains("no dice"));
    }

    #[test]
    fn bad_notation_names_the_term() {
        let err = evaluate_request(&request(&["1d20", "2dq"])).unwrap_err();
        assert!(format!("{err:#}").contains("2dq"));
    }

    #[test]
    fn seeded_requests_repeat_exactly() {
        let mut req = request(&["1d20+5", "1d4 (Guidance)"]);
        req.repeat = Some(5);
        let a = evaluate_request(&req).expect("valid request");
        let b = evaluate_request(&req).expect("valid request");
        assert_eq!(a.rolls.len(), 5);
        let values = |r: &RollReport| r.rolls.iter().map(|l| l.value).collect::<Vec<_>>();
        assert_eq!(values(&a), values(&b));
        assert_eq!(a.expression, "1d20+5 + 1d4 (Guidance)");
    }

    #[test]
    fn both_modes_cancel() {
        let mut req = request(&["1d20"]);
        req.advantage = true;
        req.disadvantage = true;
        let report = evaluate_request(&req).expect("valid request");
        let line = &report.rolls[0];
        assert!(!line.advantage);
        assert!(!line.disadvantage);
    }

    #[test]
    fn dc_outcome_is_reported() {
        let mut req = request(&["10"]);
        req.dc = Some(10);
        let report = evaluate_request(&req).expect("valid request");
        let line = &report.rolls[0];
        assert_eq!(line.passed, Some(true));
        assert_eq!(line.text, "10 = 10");
    }

    #[test]
    fn presets_keep_file_order() {
        let yaml = "zeta:\n  dice: [\"1d6\"]\nalpha:\n  dice: [\"1d20\"]\n  advantage: true\n";
        let presets = parse_presets(yaml, PresetFormat::Yaml).expect("valid yaml");
        let names: Vec<_> = presets.keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha"]);
        assert!(find_preset(&presets, "ALPHA").expect("present").advantage);
        assert!(find_preset(&presets, "missing").is_none());
    }

    #[test]
    fn bom_prefixed_text_decodes() {
        let mut utf8 = vec![0xEF, 0xBB, 0xBF];
        utf8.extend_from_slice(b"a: {}");
        assert_eq!(decode_text(utf8).expect("utf-8"), "a: {}");

        let mut utf16 = vec![0xFF, 0xFE];
        for unit in "b: {}".encode_utf16() {
            utf16.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text(utf16).expect("utf-16"), "b: {}");

        assert!(decode_text(vec![0xC3, 0x28]).is_err());
    }

    #[test]
    fn presets_load_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("party.json");
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(br#"{"smite": {"dice": ["2d8 (Smite)"]}}"#);
        fs::write(&path, bytes).expect("write presets");
        let presets = load_presets(&path).expect("loads");
        assert_eq!(presets["smite"].dice, ["2d8 (Smite)"]);

        let err = load_presets(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read presets"));
    }

    #[test]
    fn json_presets_parse() {
        let json = r#"{"attack": {"dice": ["1d20+4"], "dc": 13}}"#;
        let presets = parse_presets(json, PresetFormat::Json).expect("valid json");
        assert_eq!(presets["attack"].dc, Some(13));
        assert_eq!(
            PresetFormat::from_path(Path::new("p.JSON")),
            PresetFormat::Json
        );
        assert_eq!(
            PresetFormat::from_path(Path::new("p.yml")),
            PresetFormat::Yaml
        );
    }
}
