use std::{collections::BTreeMap, io::Write, path::Path};

use crate::{Result, SolverError};

use super::LinkId;

/// Link flows keyed by link, ordered by (tail, head).
pub type FlowMap = BTreeMap<LinkId, f64>;

/// Reads a flow file: one `linkKey value` pair per line, `#` starts a comment line. Columns
/// after the value are ignored.
pub fn read_flows_file(path: impl AsRef<Path>) -> Result<FlowMap> {
    let path = path.as_ref();
    log::debug!("Reading flows from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    parse_flows(&contents, &path.display().to_string())
}

pub fn parse_flows(contents: &str, file: &str) -> Result<FlowMap> {
    let mut flows = FlowMap::new();
    for (i, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parse_error = |message: String| SolverError::ParseError {
            file: file.to_owned(),
            line: i + 1,
            message,
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(parse_error(format!(
                "expected \"linkKey value\", found {} field",
                parts.len()
            )));
        }
        let link: LinkId = parts[0].parse().map_err(parse_error)?;
        let flow: f64 = parts[1]
            .parse()
            .map_err(|_| parse_error(format!("\"{}\" is not a number", parts[1])))?;
        if flows.insert(link, flow).is_some() {
            return Err(parse_error(format!("link {link} appears twice")));
        }
    }
    Ok(flows)
}

pub fn write_flows_file(path: impl AsRef<Path>, flows: &FlowMap) -> Result<()> {
    let path = path.as_ref();
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "# link flow")?;
    for (link, flow) in flows {
        writeln!(file, "{link} {flow}")?;
    }
    log::debug!("Wrote {} link flows to {}", flows.len(), path.display());
    Ok(())
}
