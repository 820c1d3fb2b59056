//! Where the foliation comes from: exactly one of four flag sets.

use anyhow::{bail, Context, Result};
use arnoux_yoccoz::api::{FoliationRp2, WeightedTree};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};

#[derive(Args, Clone, Debug, Default)]
pub struct SourceArgs {
    /// Arnoux–Yoccoz foliation of the given genus (>= 3)
    #[arg(long, value_name = "GENUS")]
    pub arnoux_yoccoz: Option<usize>,

    /// Weighted tree, generation by generation; `0` closes a vertex's children
    #[arg(long, value_name = "WEIGHTS", allow_hyphen_values = true)]
    pub tree: Option<String>,

    /// Interval lengths (comma separated); needs --pairing
    #[arg(long, value_delimiter = ',', num_args = 1.., requires = "pairing")]
    pub lengths: Option<Vec<f64>>,

    /// Interval pairing (comma separated); needs --lengths
    #[arg(long, value_delimiter = ',', num_args = 1.., requires = "lengths")]
    pub pairing: Option<Vec<usize>>,

    /// Random tree with this many edges
    #[arg(long, value_name = "EDGES")]
    pub random_edges: Option<usize>,

    /// Seed for --random-edges
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

/// Splits on whitespace and commas.
pub fn parse_weights(text: &str) -> Result<Vec<f64>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .map(|w| {
            w.parse::<f64>()
                .with_context(|| format!("invalid tree weight {w:?}"))
        })
        .collect()
}

impl SourceArgs {
    fn given(&self) -> usize {
        usize::from(self.arnoux_yoccoz.is_some())
            + usize::from(self.tree.is_some())
            + usize::from(self.lengths.is_some())
            + usize::from(self.random_edges.is_some())
    }

    /// Builds the foliation. Input errors surface with the offending flag named.
    pub fn build(&self) -> Result<FoliationRp2> {
        if self.given() != 1 {
            bail!(
                "give exactly one of --arnoux-yoccoz, --tree, --lengths/--pairing, --random-edges"
            );
        }
        if let Some(genus) = self.arnoux_yoccoz {
            return FoliationRp2::arnoux_yoccoz(genus).context("--arnoux-yoccoz");
        }
        if let Some(text) = &self.tree {
            let tree = WeightedTree::from_weights(&parse_weights(text)?).context("--tree")?;
            return Ok(FoliationRp2::from_tree(&tree));
        }
        if let (Some(lengths), Some(pairing)) = (&self.lengths, &self.pairing) {
            return FoliationRp2::new(lengths.clone(), pairing.clone())
                .context("--lengths/--pairing");
        }
        if let Some(edges) = self.random_edges {
            let mut rng = StdRng::seed_from_u64(self.seed);
            let tree = WeightedTree::random_default(edges, &mut rng).context("--random-edges")?;
            return Ok(FoliationRp2::from_tree(&tree));
        }
        bail!("--lengths needs --pairing")
    }

    /// The flags as provenance parameters.
    pub fn params(&self) -> Value {
        json!({
            "arnoux_yoccoz": self.arnoux_yoccoz,
            "tree": self.tree,
            "lengths": self.lengths,
            "pairing": self.pairing,
            "random_edges": self.random_edges,
            "seed": self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_accept_spaces_and_commas() {
        assert_eq!(
            parse_weights("0.1 0.2,0.3  0 0.4").unwrap(),
            vec![0.1, 0.2, 0.3, 0.0, 0.4]
        );
        assert!(parse_weights("0.1 x").is_err());
    }

    #[test]
    fn exactly_one_source() {
        assert!(SourceArgs::default().build().is_err());
        let both = SourceArgs {
            arnoux_yoccoz: Some(3),
            random_edges: Some(4),
            ..SourceArgs::default()
        };
        assert!(both.build().is_err());
    }

    #[test]
    fn every_source_builds() {
        let ay = SourceArgs {
            arnoux_yoccoz: Some(3),
            ..SourceArgs::default()
        };
        assert_eq!(ay.build().unwrap().num_separatrices(), 6);

        let tree = SourceArgs {
            tree: Some("0.1 0.2 0.3 0 0.4 0.5".into()),
            ..SourceArgs::default()
        };
        assert_eq!(tree.build().unwrap().num_separatrices(), 10);

        let explicit = SourceArgs {
            lengths: Some(vec![0.1, 0.1, 0.2, 0.2, 0.3, 0.3]),
            pairing: Some(vec![1, 0, 3, 2, 5, 4]),
            ..SourceArgs::default()
        };
        assert_eq!(explicit.build().unwrap().disk().pairing(), &[1, 0, 3, 2, 5, 4]);

        let random = SourceArgs {
            random_edges: Some(5),
            seed: 11,
            ..SourceArgs::default()
        };
        assert_eq!(random.build().unwrap().num_separatrices(), 10);
    }

    #[test]
    fn invalid_inputs_name_their_flag() {
        let crossing = SourceArgs {
            lengths: Some(vec![0.1; 6]),
            pairing: Some(vec![2, 3, 0, 1, 5, 4]),
            ..SourceArgs::default()
        };
        let err = crossing.build().unwrap_err();
        assert!(format!("{err:#}").starts_with("--lengths/--pairing"));

        let small = SourceArgs {
            arnoux_yoccoz: Some(2),
            ..SourceArgs::default()
        };
        assert!(small.build().is_err());
    }
}
