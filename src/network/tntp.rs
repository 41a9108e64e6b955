use std::{collections::HashMap, path::Path};

use crate::{Result, SolverError};

use super::{Link, Network, NodeId, OdPair, DEFAULT_ALPHA, DEFAULT_BETA};

const END_OF_METADATA: &str = "<END OF METADATA>";

impl Network {
    /// Reads a network in TNTP format from a link file and a trips file.
    pub fn from_tntp(net_file: impl AsRef<Path>, trips_file: impl AsRef<Path>) -> Result<Self> {
        let (net_file, trips_file) = (net_file.as_ref(), trips_file.as_ref());
        log::debug!(
            "Reading network from {} and demand from {}",
            net_file.display(),
            trips_file.display()
        );
        let net = std::fs::read_to_string(net_file)?;
        let trips = std::fs::read_to_string(trips_file)?;
        Self::parse_tntp(
            &net,
            &net_file.display().to_string(),
            &trips,
            &trips_file.display().to_string(),
        )
    }

    pub fn from_tntp_str(net: &str, trips: &str) -> Result<Self> {
        Self::parse_tntp(net, "<net>", trips, "<trips>")
    }

    fn parse_tntp(net: &str, net_name: &str, trips: &str, trips_name: &str) -> Result<Self> {
        let (metadata, body) = parse_metadata(net, net_name)?;
        let links = parse_links(body, net_name)?;

        if let Some(expected) = metadata_value::<usize>(&metadata, "NUMBER OF LINKS", net_name)? {
            if expected != links.len() {
                return Err(SolverError::NetworkShapeError(format!(
                    "{net_name} declares {expected} links, but defines {}",
                    links.len()
                )));
            }
        }
        let first_through_node =
            metadata_value::<NodeId>(&metadata, "FIRST THRU NODE", net_name)?.unwrap_or(0);

        let (trips_metadata, trips_body) = parse_metadata(trips, trips_name)?;
        let od_pairs = parse_trips(trips_body, trips_name)?;

        if let Some(expected) =
            metadata_value::<f64>(&trips_metadata, "TOTAL OD FLOW", trips_name)?
        {
            let total: f64 = od_pairs.iter().map(|od| od.demand).sum();
            if (total - expected).abs() > 1e-6 * expected.abs().max(1.0) {
                log::warn!("{trips_name} declares total demand {expected}, but contains {total}.");
            }
        }

        let network = Network::new(links, od_pairs)?.with_first_through_node(first_through_node);
        if let Some(expected) = metadata_value::<usize>(&metadata, "NUMBER OF NODES", net_name)? {
            if expected != network.node_count() {
                log::warn!(
                    "{net_name} declares {expected} nodes, but links touch {}.",
                    network.node_count()
                );
            }
        }
        Ok(network)
    }
}

/// A body line with its 1-based line number.
type Line<'a> = (usize, &'a str);

fn parse_metadata<'a>(
    contents: &'a str,
    file: &str,
) -> Result<(HashMap<String, String>, Vec<Line<'a>>)> {
    let mut metadata = HashMap::new();
    let mut lines = contents.lines().enumerate().map(|(i, l)| (i + 1, l));
    let mut found_end = false;

    for (_, line) in lines.by_ref() {
        let line = line.trim();
        if line.starts_with(END_OF_METADATA) {
            found_end = true;
            break;
        }
        if let Some(rest) = line.strip_prefix('<') {
            if let Some((key, value)) = rest.split_once('>') {
                metadata.insert(key.trim().to_uppercase(), value.trim().to_owned());
            }
        }
    }
    if !found_end {
        return Err(SolverError::ParseError {
            file: file.to_owned(),
            line: contents.lines().count(),
            message: format!("missing {END_OF_METADATA}"),
        });
    }

    let body = lines
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('~')
        })
        .collect();
    Ok((metadata, body))
}

fn metadata_value<T: std::str::FromStr>(
    metadata: &HashMap<String, String>,
    key: &str,
    file: &str,
) -> Result<Option<T>> {
    match metadata.get(key) {
        None => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| SolverError::ParseError {
                file: file.to_owned(),
                line: 0,
                message: format!("metadata <{key}> has invalid value \"{value}\""),
            }),
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str, file: &str, line: usize) -> Result<T> {
    raw.parse::<T>().map_err(|_| SolverError::ParseError {
        file: file.to_owned(),
        line,
        message: format!("{what} \"{raw}\" is not a number"),
    })
}

/// Columns: init term capacity length fft b power speed toll type, terminated by `;`.
fn parse_links(body: Vec<Line>, file: &str) -> Result<Vec<Link>> {
    body.into_iter()
        .map(|(line_number, line)| {
            let fields: Vec<&str> = line
                .trim()
                .trim_end_matches(';')
                .split_whitespace()
                .collect();
            if fields.len() < 5 {
                return Err(SolverError::ParseError {
                    file: file.to_owned(),
                    line: line_number,
                    message: format!("expected at least 5 link columns, found {}", fields.len()),
                });
            }
            let optional = |column: usize, what: &str, default: f64| -> Result<f64> {
                fields
                    .get(column)
                    .map_or(Ok(default), |raw| parse_number(raw, what, file, line_number))
            };

            let tail = parse_number::<NodeId>(fields[0], "init node", file, line_number)?;
            let head = parse_number::<NodeId>(fields[1], "term node", file, line_number)?;
            let capacity = parse_number::<f64>(fields[2], "capacity", file, line_number)?;
            let free_flow_time = parse_number::<f64>(fields[4], "free flow time", file, line_number)?;
            let alpha = optional(5, "b", DEFAULT_ALPHA)?;
            let beta = optional(6, "power", DEFAULT_BETA)?;
            let toll = optional(8, "toll", 0.0)?;

            Link::new(tail, head, free_flow_time, capacity)?
                .with_shape(alpha, beta)?
                .with_toll(toll)
        })
        .collect()
}

/// Blocks of `Origin k` followed by `destination : demand;` entries.
fn parse_trips(body: Vec<Line>, file: &str) -> Result<Vec<OdPair>> {
    let mut od_pairs = vec![];
    let mut origin: Option<NodeId> = None;

    for (line_number, line) in body {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("Origin") {
            origin = Some(parse_number(rest.trim(), "origin", file, line_number)?);
            continue;
        }
        let Some(current_origin) = origin else {
            return Err(SolverError::ParseError {
                file: file.to_owned(),
                line: line_number,
                message: "demand entries appear before the first origin".to_owned(),
            });
        };
        for entry in line.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let Some((destination, demand)) = entry.split_once(':') else {
                return Err(SolverError::ParseError {
                    file: file.to_owned(),
                    line: line_number,
                    message: format!("entry \"{entry}\" is not of the form destination : demand"),
                });
            };
            let destination: NodeId = parse_number(destination.trim(), "destination", file, line_number)?;
            let demand: f64 = parse_number(demand.trim(), "demand", file, line_number)?;
            if demand == 0.0 || destination == current_origin {
                continue;
            }
            od_pairs.push(OdPair::new(current_origin, destination, demand));
        }
    }
    Ok(od_pairs)
}
