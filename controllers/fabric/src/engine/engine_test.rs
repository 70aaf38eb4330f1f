//! Unit tests for the generic reconciliation engine
//!
//! All tests run against `MockFabricClient`; every lifecycle path is
//! exercised through `ExternalClient` exactly as the reconcilers drive it.

use crate::engine::{ExternalClient, ManagedKind};
use crate::error::ControllerError;
use crds::{ApplicationProfileSpec, BridgeDomainSpec, EndpointGroupSpec, VrfSpec};
use fabric_client::{
    CLASS_BRIDGE_DOMAIN, CLASS_VRF, Dn, FabricApi, FabricError, MockFabricClient, ObjectAttributes,
    RELATION_BD_TO_VRF, RELATION_EPG_TO_BD,
};
use serde_json::json;
use std::sync::Arc;

fn attrs(pairs: &[(&str, &str)]) -> ObjectAttributes {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), json!(v)))
        .collect()
}

fn vrf_spec(name: &str, tenant: &str, alias: &str) -> VrfSpec {
    VrfSpec {
        name: name.to_string(),
        tenant: tenant.to_string(),
        name_alias: alias.to_string(),
    }
}

fn bd_spec(name: &str, tenant: &str, vrf: &str, arp_flood: &str) -> BridgeDomainSpec {
    BridgeDomainSpec {
        name: name.to_string(),
        tenant: tenant.to_string(),
        vrf: vrf.to_string(),
        arp_flood: arp_flood.to_string(),
    }
}

fn ap_spec(name: &str, tenant: &str, alias: &str) -> ApplicationProfileSpec {
    ApplicationProfileSpec {
        name: name.to_string(),
        tenant: tenant.to_string(),
        name_alias: alias.to_string(),
    }
}

fn epg_spec(name: &str, tenant: &str, profile: &str, bd: &str) -> EndpointGroupSpec {
    EndpointGroupSpec {
        name: name.to_string(),
        tenant: tenant.to_string(),
        application_profile: profile.to_string(),
        bridge_domain: bd.to_string(),
        prefered_group: "exclude".to_string(),
    }
}

fn external<K: ManagedKind>(mock: &MockFabricClient) -> ExternalClient<K> {
    ExternalClient::new(Arc::new(mock.clone()) as Arc<dyn FabricApi>)
}

#[tokio::test]
async fn observe_missing_object_reports_absent_for_every_kind() {
    let mock = MockFabricClient::new("http://test-fabric");

    let obs = external::<crds::Vrf>(&mock)
        .observe(&vrf_spec("V1", "T1", ""))
        .await
        .unwrap();
    assert!(!obs.resource_exists);

    let obs = external::<crds::BridgeDomain>(&mock)
        .observe(&bd_spec("Web", "T1", "V1", "yes"))
        .await
        .unwrap();
    assert!(!obs.resource_exists);

    let obs = external::<crds::ApplicationProfile>(&mock)
        .observe(&ap_spec("App", "T1", ""))
        .await
        .unwrap();
    assert!(!obs.resource_exists);

    let obs = external::<crds::EndpointGroup>(&mock)
        .observe(&epg_spec("Frontend", "T1", "App", "Web"))
        .await
        .unwrap();
    assert!(!obs.resource_exists);
}

#[tokio::test]
async fn vrf_create_then_observe_converges() {
    let mock = MockFabricClient::new("http://test-fabric");
    let client = external::<crds::Vrf>(&mock);
    let desired = vrf_spec("V1", "T1", "prod");

    let obs = client.observe(&desired).await.unwrap();
    assert!(!obs.resource_exists);

    client.create(&desired).await.unwrap();

    let obs = client.observe(&desired).await.unwrap();
    assert!(obs.resource_exists);
    assert!(obs.resource_up_to_date);
    assert!(obs.connection_details.is_empty());
    let attributes = obs.attributes.unwrap();
    assert_eq!(attributes.get("dn"), Some("root/tn-T1/ctx-V1"));
    assert_eq!(attributes.get("nameAlias"), Some("prod"));
}

#[tokio::test]
async fn vrf_alias_drift_detected_and_repaired() {
    let mock = MockFabricClient::new("http://test-fabric");
    mock.add_object(CLASS_VRF, &Dn::vrf("T1", "V1"), attrs(&[("nameAlias", "old")]));
    let client = external::<crds::Vrf>(&mock);
    let desired = vrf_spec("V1", "T1", "new");

    let obs = client.observe(&desired).await.unwrap();
    assert!(obs.resource_exists);
    assert!(!obs.resource_up_to_date);

    client.update(&desired).await.unwrap();

    let obs = client.observe(&desired).await.unwrap();
    assert!(obs.resource_up_to_date);
}

#[tokio::test]
async fn drift_is_symmetric_for_unset_desired_fields() {
    // A remote alias against an empty desired alias is drift too.
    let mock = MockFabricClient::new("http://test-fabric");
    mock.add_object(CLASS_VRF, &Dn::vrf("T1", "V1"), attrs(&[("nameAlias", "stale")]));
    let client = external::<crds::Vrf>(&mock);

    let obs = client.observe(&vrf_spec("V1", "T1", "")).await.unwrap();
    assert!(!obs.resource_up_to_date);
}

#[tokio::test]
async fn bridge_domain_create_establishes_vrf_relation() {
    let mock = MockFabricClient::new("http://test-fabric");
    let client = external::<crds::BridgeDomain>(&mock);
    let desired = bd_spec("Web", "T1", "Main", "yes");

    client.create(&desired).await.unwrap();

    let dn = Dn::bridge_domain("T1", "Web");
    assert_eq!(
        mock.relation(&dn, &RELATION_BD_TO_VRF).as_deref(),
        Some("root/tn-T1/ctx-Main")
    );
    let obs = client.observe(&desired).await.unwrap();
    assert!(obs.resource_up_to_date);
}

#[tokio::test]
async fn bridge_domain_arp_flood_flip_is_drift() {
    let mock = MockFabricClient::new("http://test-fabric");
    let client = external::<crds::BridgeDomain>(&mock);
    client.create(&bd_spec("Web", "T1", "Main", "no")).await.unwrap();

    let flipped = bd_spec("Web", "T1", "Main", "yes");
    let obs = client.observe(&flipped).await.unwrap();
    assert!(obs.resource_exists);
    assert!(!obs.resource_up_to_date);

    client.update(&flipped).await.unwrap();
    let obs = client.observe(&flipped).await.unwrap();
    assert!(obs.resource_up_to_date);
}

#[tokio::test]
async fn bridge_domain_retarget_vrf_is_drift() {
    let mock = MockFabricClient::new("http://test-fabric");
    let client = external::<crds::BridgeDomain>(&mock);
    client.create(&bd_spec("Web", "T1", "Main", "yes")).await.unwrap();

    let retargeted = bd_spec("Web", "T1", "Backup", "yes");
    let obs = client.observe(&retargeted).await.unwrap();
    assert!(!obs.resource_up_to_date);

    client.update(&retargeted).await.unwrap();
    assert_eq!(
        mock.relation(&Dn::bridge_domain("T1", "Web"), &RELATION_BD_TO_VRF)
            .as_deref(),
        Some("root/tn-T1/ctx-Backup")
    );
}

#[tokio::test]
async fn endpoint_group_create_establishes_bd_relation() {
    let mock = MockFabricClient::new("http://test-fabric");
    let client = external::<crds::EndpointGroup>(&mock);
    let desired = epg_spec("Frontend", "T1", "App", "Web");

    client.create(&desired).await.unwrap();

    let dn = Dn::endpoint_group("T1", "App", "Frontend");
    assert_eq!(
        mock.relation(&dn, &RELATION_EPG_TO_BD).as_deref(),
        Some("root/tn-T1/BD-Web")
    );
    let obs = client.observe(&desired).await.unwrap();
    assert!(obs.resource_up_to_date);
    assert_eq!(
        obs.attributes.unwrap().get("dn"),
        Some("root/tn-T1/ap-App/epg-Frontend")
    );
}

#[tokio::test]
async fn update_with_unchanged_spec_is_idempotent() {
    let mock = MockFabricClient::new("http://test-fabric");
    let client = external::<crds::BridgeDomain>(&mock);
    let desired = bd_spec("Web", "T1", "Main", "yes");
    client.create(&desired).await.unwrap();

    let dn = Dn::bridge_domain("T1", "Web");
    let before_object = mock.object(&dn);
    let before_relation = mock.relation(&dn, &RELATION_BD_TO_VRF);

    client.update(&desired).await.unwrap();

    assert_eq!(mock.object(&dn), before_object);
    assert_eq!(mock.relation(&dn, &RELATION_BD_TO_VRF), before_relation);
    let obs = client.observe(&desired).await.unwrap();
    assert!(obs.resource_up_to_date);
}

#[tokio::test]
async fn relation_write_failure_is_partial_and_repairable() {
    let mock = MockFabricClient::new("http://test-fabric");
    let client = external::<crds::BridgeDomain>(&mock);
    let desired = bd_spec("Web", "T1", "Main", "yes");

    mock.fail_set_relation("relation endpoint down");
    let err = client.create(&desired).await.unwrap_err();
    assert!(matches!(
        err,
        ControllerError::Relation {
            kind: "BridgeDomain",
            ..
        }
    ));

    // The object itself was written; only the relation is missing.
    let dn = Dn::bridge_domain("T1", "Web");
    assert!(mock.object(&dn).is_some());
    assert!(mock.relation(&dn, &RELATION_BD_TO_VRF).is_none());
    let obs = client.observe(&desired).await.unwrap();
    assert!(obs.resource_exists);
    assert!(!obs.resource_up_to_date);

    // Once the fault clears, an update repairs the relation.
    mock.clear_failures();
    client.update(&desired).await.unwrap();
    let obs = client.observe(&desired).await.unwrap();
    assert!(obs.resource_up_to_date);
}

#[tokio::test]
async fn relation_read_failure_treated_as_absent_not_error() {
    let mock = MockFabricClient::new("http://test-fabric");
    let client = external::<crds::BridgeDomain>(&mock);
    let desired = bd_spec("Web", "T1", "Main", "yes");
    client.create(&desired).await.unwrap();

    mock.fail_get_relation("relation endpoint down");
    let obs = client.observe(&desired).await.unwrap();
    assert!(obs.resource_exists);
    // The unreadable relation looks absent, so the object reads as drifted
    // and the next update rewrites the relation.
    assert!(!obs.resource_up_to_date);
}

#[tokio::test]
async fn transport_failure_propagates_from_observe() {
    let mock = MockFabricClient::new("http://test-fabric");
    mock.fail_get("connection refused");
    let client = external::<crds::Vrf>(&mock);

    let err = client.observe(&vrf_spec("V1", "T1", "")).await.unwrap_err();
    assert!(matches!(err, ControllerError::Fabric(FabricError::Api(_))));
}

#[tokio::test]
async fn create_failure_carries_kind_context() {
    let mock = MockFabricClient::new("http://test-fabric");
    mock.fail_upsert("write rejected");
    let client = external::<crds::Vrf>(&mock);

    let err = client.create(&vrf_spec("V1", "T1", "")).await.unwrap_err();
    assert!(matches!(err, ControllerError::Create { kind: "Vrf", .. }));

    let err = client.update(&vrf_spec("V1", "T1", "")).await.unwrap_err();
    assert!(matches!(err, ControllerError::Update { kind: "Vrf", .. }));
}

#[tokio::test]
async fn delete_tolerates_already_absent_object() {
    let mock = MockFabricClient::new("http://test-fabric");
    let client = external::<crds::Vrf>(&mock);
    let desired = vrf_spec("V1", "T1", "");

    client.create(&desired).await.unwrap();
    client.delete(&desired).await.unwrap();
    assert!(mock.object(&Dn::vrf("T1", "V1")).is_none());

    // Second delete finds nothing and still succeeds.
    client.delete(&desired).await.unwrap();
}

#[tokio::test]
async fn bridge_domain_delete_removes_relation_child() {
    let mock = MockFabricClient::new("http://test-fabric");
    let client = external::<crds::BridgeDomain>(&mock);
    let desired = bd_spec("Web", "T1", "Main", "yes");
    client.create(&desired).await.unwrap();

    client.delete(&desired).await.unwrap();

    let dn = Dn::bridge_domain("T1", "Web");
    assert!(mock.object(&dn).is_none());
    assert!(mock.relation(&dn, &RELATION_BD_TO_VRF).is_none());
}

#[tokio::test]
async fn identity_fields_address_a_different_object() {
    // Changing name or tenant points at a different DN entirely: the old
    // object stays, and the new one reads as absent.
    let mock = MockFabricClient::new("http://test-fabric");
    let client = external::<crds::Vrf>(&mock);
    client.create(&vrf_spec("V1", "T1", "prod")).await.unwrap();

    let renamed = vrf_spec("V2", "T1", "prod");
    let obs = client.observe(&renamed).await.unwrap();
    assert!(!obs.resource_exists);
    assert!(mock.object(&Dn::vrf("T1", "V1")).is_some());
}

#[tokio::test]
async fn stale_relation_prefix_reads_as_absent() {
    // A relation target whose trailing segment carries the wrong kind
    // prefix cannot name a VRF; it must read as absent, not error.
    let mock = MockFabricClient::new("http://test-fabric");
    let dn = Dn::bridge_domain("T1", "Web");
    mock.add_object(CLASS_BRIDGE_DOMAIN, &dn, attrs(&[("arpFlood", "yes")]));
    mock.add_relation(&dn, &RELATION_BD_TO_VRF, "root/tn-T1/BD-NotAVrf");

    let client = external::<crds::BridgeDomain>(&mock);
    let obs = client.observe(&bd_spec("Web", "T1", "Main", "yes")).await.unwrap();
    assert!(obs.resource_exists);
    assert!(!obs.resource_up_to_date);
}
