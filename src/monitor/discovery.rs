//! Parsing of `ddcutil detect --brief` output into monitor records.
//!
//! The output is a sequence of text blocks separated by a blank line, one per
//! detected display:
//!
//! ```text
//! Display 1
//!    I2C bus:  /dev/i2c-4
//!    Monitor:  SAM:S24E650:H4ZN800591
//! ```
//!
//! An invalid display block carries `Invalid display` instead of a `Display N`
//! heading; those monitors are kept but marked not DDC-capable so they only
//! get a dimming overlay.

use crate::ddcutil::DdcutilClient;

use super::Monitor;

/// Run a detect scan. Any failure to get output at all ends the scan with
/// zero monitors; there is no retry.
pub async fn discover(client: &DdcutilClient) -> Vec<Monitor> {
    let output = match client.detect_brief().await {
        Ok(output) => output,
        Err(err) => {
            error!("monitor detection failed: {err}");
            return Vec::new();
        }
    };

    let monitors = parse_detect_output(&output);
    info!("detected {} monitor(s)", monitors.len());
    monitors
}

/// Split detect output into blocks and parse each one. A malformed block is
/// skipped with a warning; it never aborts the rest of the scan.
pub fn parse_detect_output(output: &str) -> Vec<Monitor> {
    output
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .enumerate()
        .filter_map(|(index, block)| parse_block(index, block))
        .collect()
}

fn parse_block(index: usize, block: &str) -> Option<Monitor> {
    let ddc_capable = !block.contains("Invalid");

    let name_line = match block.lines().find(|line| line.contains("Monitor")) {
        Some(line) => line,
        None => {
            warn!("skipping detect block {index}: no Monitor line");
            return None;
        }
    };
    let bus_line = match block.lines().find(|line| line.contains("I2C bus")) {
        Some(line) => line,
        None => {
            warn!("skipping detect block {index}: no I2C bus line");
            return None;
        }
    };

    // Monitor line is colon-delimited with the model in the third field,
    // e.g. `Monitor:  SAM:S24E650:H4ZN800591`.
    let name = name_line
        .split(':')
        .nth(2)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| format!("monitor {}", index + 1));

    let bus = match bus_line
        .split("/dev/i2c-")
        .nth(1)
        .and_then(|rest| rest.trim().parse().ok())
    {
        Some(bus) => bus,
        None => {
            warn!("skipping detect block {index}: unparseable bus in {bus_line:?}");
            return None;
        }
    };

    Some(Monitor {
        index,
        bus,
        name,
        ddc_capable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_MONITORS: &str = "\
Display 1
   I2C bus:  /dev/i2c-4
   Monitor:  SAM:S24E650:H4ZN800591

Invalid display
   I2C bus:  /dev/i2c-5
   Monitor:  GSM:LG HDR 4K:
   DDC communication failed

";

    #[test]
    fn parses_valid_and_invalid_blocks() {
        let monitors = parse_detect_output(TWO_MONITORS);
        assert_eq!(monitors.len(), 2);

        assert_eq!(monitors[0].index, 0);
        assert_eq!(monitors[0].bus, 4);
        assert_eq!(monitors[0].name, "S24E650");
        assert!(monitors[0].ddc_capable);

        assert_eq!(monitors[1].index, 1);
        assert_eq!(monitors[1].bus, 5);
        assert_eq!(monitors[1].name, "LG HDR 4K");
        assert!(!monitors[1].ddc_capable);
    }

    #[test]
    fn empty_name_gets_placeholder() {
        let out = "Display 1\n   I2C bus:  /dev/i2c-7\n   Monitor:  ABC::\n";
        let monitors = parse_detect_output(out);
        assert_eq!(monitors.len(), 1);
        assert_eq!(monitors[0].name, "monitor 1");
        assert_eq!(monitors[0].bus, 7);
    }

    #[test]
    fn malformed_block_is_skipped_not_fatal() {
        let out = "\
Display 1
   something unexpected

Display 2
   I2C bus:  /dev/i2c-6
   Monitor:  DEL:U2720Q:ABCDE

Display 3
   Monitor:  DEL:P2419H:XYZ
";
        let monitors = parse_detect_output(out);
        // Block without a Monitor line and block without an I2C bus line both
        // drop; the well-formed one survives with its original block index.
        assert_eq!(monitors.len(), 1);
        assert_eq!(monitors[0].index, 1);
        assert_eq!(monitors[0].name, "U2720Q");
        assert_eq!(monitors[0].bus, 6);
    }

    #[test]
    fn no_output_means_no_monitors() {
        assert!(parse_detect_output("").is_empty());
        assert!(parse_detect_output("\n\n\n").is_empty());
    }
}
