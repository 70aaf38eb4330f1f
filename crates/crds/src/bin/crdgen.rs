//! Prints the CRD manifests for all fabric resources as multi-document YAML.
//!
//! Usage: `cargo run --bin crdgen > deploy/crds.yaml`

use crds::{ApplicationProfile, BridgeDomain, EndpointGroup, Vrf};
use kube::CustomResourceExt;

fn main() -> Result<(), serde_yaml::Error> {
    let manifests = [
        serde_yaml::to_string(&Vrf::crd())?,
        serde_yaml::to_string(&BridgeDomain::crd())?,
        serde_yaml::to_string(&ApplicationProfile::crd())?,
        serde_yaml::to_string(&EndpointGroup::crd())?,
    ];
    println!("{}", manifests.join("---\n"));
    Ok(())
}
