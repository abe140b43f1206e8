use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{PartitionRecord, ThresholdPair};

/// Line separator inside Nagios long output: a backslash followed by `n`,
/// not an actual newline character.
pub const LITERAL_NEWLINE: &str = "\\n";

const SPACE_MARKER: &str = "free space:";
const THRESHOLD_MARKER: &str = "THRESHOLDS - ";

// Everything after the marker up to the perfdata separator.
static RE_SPACE_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"free space:\s*([^|]*)").unwrap());

// `/data 16273093 MB (26% inode=99%)`
static RE_PARTITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s+([^(\s][^(]*?)\s*\((\d+)%(?:[^%)][^)]*)?\)").unwrap()
});

static RE_THRESHOLDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"WARNING:(\d+)%;CRITICAL:(\d+)%;").unwrap());

static RE_LINE_PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)%").unwrap());

/// Parses the per-partition free space out of a `check_disk` summary line.
///
/// Handles both the short form, where partitions end with `:`
///
/// ```text
/// DISK CRITICAL - free space: / 7002 MB (18% inode=60%): /data 16273093 MB (26% inode=99%):
/// ```
///
/// and the long form, where they end with `;` and perfdata follows a `|`.
/// Tokens that don't look like a partition are dropped; no match yields an
/// empty vector.
pub fn extract_partitions(summary: &str) -> Vec<PartitionRecord> {
    if !summary.contains(SPACE_MARKER) {
        return Vec::new();
    }
    let segment = match RE_SPACE_SEGMENT.captures(summary).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => return Vec::new(),
    };
    let delimiter = if segment.contains(';') { ';' } else { ':' };

    segment
        .split(delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(parse_partition_token)
        .collect()
}

fn parse_partition_token(token: &str) -> Option<PartitionRecord> {
    let caps = RE_PARTITION.captures(token)?;
    let free_percent = parse_percent_u8(&caps[3])?;
    Some(PartitionRecord {
        partition: caps[1].to_string(),
        free_amount: caps[2].trim().to_string(),
        free_percent,
    })
}

/// Finds the `THRESHOLDS - WARNING:<n>%;CRITICAL:<n>%;` declaration in the
/// check's long output. Only the first `THRESHOLDS - ` line is considered;
/// if it is malformed or out of range there are no thresholds.
pub fn parse_thresholds(detail: &str) -> Option<ThresholdPair> {
    let line = detail
        .split(LITERAL_NEWLINE)
        .find(|line| line.contains(THRESHOLD_MARKER))?;
    let caps = RE_THRESHOLDS.captures(line)?;

    let warning_percent = parse_percent_u8(&caps[1])?;
    let critical_percent = parse_percent_u8(&caps[2])?;
    Some(ThresholdPair {
        warning_percent,
        critical_percent,
    })
}

/// True for the line that declares the thresholds itself.
pub fn is_threshold_line(line: &str) -> bool {
    line.contains("THRESHOLDS")
}

/// First `<number>%` in a line, if it is a valid percentage.
pub fn first_percent(line: &str) -> Option<f64> {
    let caps = RE_LINE_PERCENT.captures(line)?;
    let value: f64 = caps[1].parse().ok()?;
    (0.0..=100.0).contains(&value).then_some(value)
}

/// Expands the literal `\n` and `\t` tokens Nagios leaves in macro values.
pub fn unescape_text(text: &str) -> String {
    text.replace(LITERAL_NEWLINE, "\n").replace("\\t", "\t")
}

fn parse_percent_u8(digits: &str) -> Option<u8> {
    digits.parse::<u8>().ok().filter(|p| *p <= 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT_FORM: &str =
        "DISK CRITICAL - free space: / 7002 MB (18% inode=60%): /data 16273093 MB (26% inode=99%):";
    const LONG_FORM: &str = "DISK CRITICAL - free space: / 7051 MB (18% inode=60%); /data 16733467 MB (26% inode=99%);| /=31220MB;36287;2015;0;40319 /dev/shm=81MB;2236;124;0;2485 /data=44240486MB;54876558;3048697;0;60973954";

    #[test]
    fn test_extract_short_form() {
        let partitions = extract_partitions(SHORT_FORM);
        assert_eq!(
            partitions,
            vec![
                PartitionRecord {
                    partition: "/".to_string(),
                    free_amount: "7002 MB".to_string(),
                    free_percent: 18,
                },
                PartitionRecord {
                    partition: "/data".to_string(),
                    free_amount: "16273093 MB".to_string(),
                    free_percent: 26,
                },
            ]
        );
    }

    #[test]
    fn test_extract_long_form() {
        let partitions = extract_partitions(LONG_FORM);
        assert_eq!(partitions.len(), 2);
        assert_eq!(partitions[0].partition, "/");
        assert_eq!(partitions[0].free_amount, "7051 MB");
        assert_eq!(partitions[0].free_percent, 18);
        assert_eq!(partitions[1].partition, "/data");
        assert_eq!(partitions[1].free_percent, 26);
    }

    #[test]
    fn test_extract_without_marker() {
        assert!(extract_partitions("").is_empty());
        assert!(extract_partitions("DISK OK").is_empty());
        assert!(extract_partitions("/ 7002 MB (18% inode=60%):").is_empty());
        assert!(extract_partitions("\u{0}\u{1}\u{fffd}garbage((%%)").is_empty());
    }

    #[test]
    fn test_extract_drops_malformed_tokens() {
        // doubled percent, missing percent, out of range, no quantity
        let summary = "DISK WARNING - free space: /a 1 MB (18%%): /b 2 MB (18 inode=60%): /c 3 MB (101%): /d (5%): /e 5 GB (5%):";
        let partitions = extract_partitions(summary);
        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions[0].partition, "/e");
        assert_eq!(partitions[0].free_amount, "5 GB");
        assert_eq!(partitions[0].free_percent, 5);
    }

    #[test]
    fn test_extract_preserves_order() {
        let summary = "DISK WARNING - free space: /z 1 MB (90%); /a 2 MB (10%); /m 3 MB (50%);";
        let names: Vec<_> = extract_partitions(summary)
            .into_iter()
            .map(|p| p.partition)
            .collect();
        assert_eq!(names, vec!["/z", "/a", "/m"]);
    }

    #[test]
    fn test_parse_thresholds() {
        let detail = "Filesystem Size Used Avail Use% Mounted on\\nTHRESHOLDS - WARNING:50%;CRITICAL:40%;\\n/dev/sda1 40G 30G 10G 75% /";
        assert_eq!(
            parse_thresholds(detail),
            Some(ThresholdPair {
                warning_percent: 50,
                critical_percent: 40,
            })
        );
    }

    #[test]
    fn test_parse_thresholds_first_wins() {
        let detail = "THRESHOLDS - WARNING:20%;CRITICAL:10%;\\nTHRESHOLDS - WARNING:50%;CRITICAL:40%;";
        let pair = parse_thresholds(detail).unwrap();
        assert_eq!(pair.warning_percent, 20);
        assert_eq!(pair.critical_percent, 10);
    }

    #[test]
    fn test_parse_thresholds_missing_or_malformed() {
        assert_eq!(parse_thresholds(""), None);
        assert_eq!(parse_thresholds("WARNING:50%;CRITICAL:40%;"), None);
        assert_eq!(parse_thresholds("THRESHOLDS - WARNING:50%"), None);
        assert_eq!(parse_thresholds("THRESHOLDS - WARNING:x%;CRITICAL:40%;"), None);
        assert_eq!(parse_thresholds("THRESHOLDS - WARNING:150%;CRITICAL:40%;"), None);
        assert_eq!(parse_thresholds("THRESHOLDS - WARNING:50%;CRITICAL:999%;"), None);
    }

    #[test]
    fn test_malformed_first_declaration_is_final() {
        let valid = "\\nTHRESHOLDS - WARNING:50%;CRITICAL:40%;";
        assert_eq!(parse_thresholds(&format!("THRESHOLDS - WARNING:x%;CRITICAL:1%;{}", valid)), None);
        assert_eq!(parse_thresholds(&format!("THRESHOLDS - WARNING:150%;CRITICAL:1%;{}", valid)), None);
        assert_eq!(parse_thresholds(&format!("THRESHOLDS - none declared{}", valid)), None);
    }

    #[test]
    fn test_first_percent() {
        assert_eq!(first_percent("/dev/sda1 40G 26G 14G 65% /"), Some(65.0));
        assert_eq!(first_percent("/dev/sdb1 10G 4.5G 5.5G 45.5% /srv"), Some(45.5));
        assert_eq!(first_percent("tmpfs 2G 0 2G 0% /dev/shm"), Some(0.0));
        assert_eq!(first_percent("Filesystem Size Used Avail Use% Mounted on"), None);
        assert_eq!(first_percent("overflow 250% /"), None);
        assert_eq!(first_percent(""), None);
    }

    #[test]
    fn test_unescape_text() {
        assert_eq!(unescape_text("a\\nb\\tc"), "a\nb\tc");
        assert_eq!(unescape_text("plain"), "plain");
    }
}
