use std::fmt::Display;

use colored::Colorize;

use super::Network;

const MOST_UTILISED: usize = 10;

impl Network {
    fn display_flows(&self) -> String {
        if self.links.iter().all(|link| link.flow == 0.0) {
            return "No flow has been loaded yet.".to_string();
        }

        let mut by_utilisation: Vec<_> = self.links.iter().collect();
        by_utilisation.sort_by(|a, b| b.utilisation().total_cmp(&a.utilisation()));
        format!(
            "Total system travel time is {:.3}. Most utilised links:\n{}",
            self.total_system_travel_time(),
            by_utilisation
                .iter()
                .take(MOST_UTILISED)
                .map(|link| {
                    let line = format!(
                        "{:>12} flow {:>12.3}  cost {:>10.4}  v/c {:>6.3}",
                        link.id.to_string(),
                        link.flow,
                        link.cost,
                        link.utilisation()
                    );
                    if link.utilisation() > 1.0 {
                        line.red().to_string()
                    } else {
                        line
                    }
                })
                .collect::<Vec<String>>()
                .join("\n")
        )
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut string_repr: Vec<String> = vec![];
        string_repr.push("\nNetwork:".to_string());
        string_repr.push("========".to_string());
        string_repr.push(format!(
            "{} nodes, {} links, {} origins, {} OD pairs with total demand {}",
            self.node_count(),
            self.link_count(),
            self.od_pairs.len(),
            self.od_pairs().count(),
            self.total_demand()
        ));
        if self.first_through_node > 0 {
            string_repr.push(format!(
                "Nodes below {} are zone centroids.",
                self.first_through_node
            ));
        }
        string_repr.push("".to_string());
        string_repr.push(self.display_flows());
        write!(f, "{}", string_repr.join("\n"))
    }
}
