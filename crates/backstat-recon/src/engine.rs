//! Grouping primitive and the four reconciliation workflows.

use backstat_cluster::{ClusterQuery, LabelSelector, ResourceKind};
use backstat_model::{
    Badge, Item, ItemColor, NamespaceGroup, RawVolumeClaim, RawWorkload, Severity,
};
use tracing::debug;

use crate::error::ReconError;
use crate::{DatabaseKind, StorageClasses};

/// Label key carrying the backup convention on workloads and claims.
pub const BACKUP_LABEL: &str = "backup";

/// Label value marking NFS-backed-up claims.
const NFS_BACKUP_VALUE: &str = "nfs";

/// Fold `(namespace, item)` pairs into `acc`, one group per namespace.
///
/// A repeated namespace appends to its existing group instead of creating
/// a duplicate; group and item order is first-seen order. Callers thread a
/// prior result through as `acc` to merge several record batches into one
/// grouped structure. Namespace counts are small, so the lookup is a
/// linear scan.
pub fn group_by_namespace<I>(entries: I, mut acc: Vec<NamespaceGroup>) -> Vec<NamespaceGroup>
where
    I: IntoIterator<Item = (String, Item)>,
{
    for (namespace, item) in entries {
        match acc.iter_mut().find(|group| group.name == namespace) {
            Some(group) => group.items.push(item),
            None => acc.push(NamespaceGroup {
                name: namespace,
                items: vec![item],
            }),
        }
    }
    acc
}

/// Workflow A: inventory database workloads of one kind into `acc`.
///
/// Each workload becomes an item with a blank row color and two badges:
/// the database kind and its availability. Status is conveyed purely via
/// badges at this stage.
pub fn fetch_databases(
    client: &dyn ClusterQuery,
    kind: DatabaseKind,
    acc: Vec<NamespaceGroup>,
) -> Result<Vec<NamespaceGroup>, ReconError> {
    let selector = LabelSelector::eq(BACKUP_LABEL, kind.label());
    let records = client.query(ResourceKind::DeploymentConfig, Some(&selector))?;
    let workloads = records
        .iter()
        .map(RawWorkload::from_value)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(kind = kind.label(), count = workloads.len(), "reconciling workloads");

    Ok(group_by_namespace(
        workloads.into_iter().map(|workload| {
            let available = workload.is_available();
            let item = Item::new(
                workload.name,
                ItemColor::Blank,
                vec![
                    Badge::new(kind.label(), Severity::Neutral),
                    Badge::availability(available),
                ],
            );
            (workload.namespace, item)
        }),
        acc,
    ))
}

/// Workflow B: fold volume claims into `acc`.
///
/// Badges are the capacity (or `?`) and the phase; `backup` drives the
/// row color. Unlike the other workflows the returned groups are always
/// sorted ascending by namespace name.
pub fn reduce_pvc(
    claims: &[RawVolumeClaim],
    backup: bool,
    acc: Vec<NamespaceGroup>,
) -> Vec<NamespaceGroup> {
    let color = if backup {
        ItemColor::Success
    } else {
        ItemColor::Danger
    };

    let mut groups = group_by_namespace(
        claims.iter().map(|claim| {
            let phase_severity = if claim.is_bound() {
                Severity::Success
            } else {
                Severity::Danger
            };
            let item = Item::new(
                claim.name.clone(),
                color,
                vec![
                    Badge::new(claim.capacity_label(), Severity::Neutral),
                    Badge::new(claim.phase.clone(), phase_severity),
                ],
            );
            (claim.namespace.clone(), item)
        }),
        acc,
    );

    groups.sort_by(|a, b| a.name.cmp(&b.name));
    groups
}

/// Workflow C: inventory NFS claims into `acc`.
///
/// `backup` selects which partition of the labeling convention to list
/// (`backup=nfs` vs `backup!=nfs`) and drives the row color through
/// [`reduce_pvc`]. Only claims on the NFS storage class are kept.
pub fn fetch_nfs(
    client: &dyn ClusterQuery,
    storage: &StorageClasses,
    backup: bool,
    acc: Vec<NamespaceGroup>,
) -> Result<Vec<NamespaceGroup>, ReconError> {
    let selector = if backup {
        LabelSelector::eq(BACKUP_LABEL, NFS_BACKUP_VALUE)
    } else {
        LabelSelector::ne(BACKUP_LABEL, NFS_BACKUP_VALUE)
    };
    let claims = fetch_claims(client, Some(&selector))?;
    let nfs_claims: Vec<RawVolumeClaim> = claims
        .into_iter()
        .filter(|claim| claim.has_storage_class(&storage.nfs))
        .collect();

    debug!(backup, count = nfs_claims.len(), "reconciling nfs claims");

    Ok(reduce_pvc(&nfs_claims, backup, acc))
}

/// Workflow D: cross-reference ceph claims against database workloads.
///
/// Lists all claims, keeps the ceph-backed ones, and joins each against
/// `dc_groups` by (namespace, name). A claim with a matching workload is
/// recolored success and gains that workload's availability badge; a
/// lookup miss is a normal outcome and leaves the claim on the danger
/// baseline from [`reduce_pvc`].
pub fn merge_dc_with_ceph_pvc(
    client: &dyn ClusterQuery,
    storage: &StorageClasses,
    dc_groups: &[NamespaceGroup],
) -> Result<Vec<NamespaceGroup>, ReconError> {
    let claims = fetch_claims(client, None)?;
    let ceph_claims: Vec<RawVolumeClaim> = claims
        .into_iter()
        .filter(|claim| claim.has_storage_class(&storage.ceph))
        .collect();

    debug!(count = ceph_claims.len(), "cross-referencing ceph claims");

    let merged = reduce_pvc(&ceph_claims, false, Vec::new())
        .into_iter()
        .map(|group| {
            let dc_group = dc_groups.iter().find(|dc| dc.name == group.name);
            let items = group
                .items
                .into_iter()
                .map(|item| match dc_group.and_then(|dc| lookup_item(dc, &item.name)) {
                    Some(workload) => merge_availability(item, workload),
                    None => item,
                })
                .collect();
            NamespaceGroup {
                name: group.name,
                items,
            }
        })
        .collect();

    Ok(merged)
}

fn lookup_item<'a>(group: &'a NamespaceGroup, name: &str) -> Option<&'a Item> {
    group.items.iter().find(|item| item.name == name)
}

/// Build the merged claim item: same name, success color, and the
/// workload's availability badge appended. The original item is not
/// mutated; the merge constructs a new one.
fn merge_availability(item: Item, workload: &Item) -> Item {
    let mut badges = item.badges;
    if let Some(availability) = workload.badges.iter().find(|badge| badge.is_availability()) {
        badges.push(availability.clone());
    }
    Item {
        name: item.name,
        color: ItemColor::Success,
        badges,
    }
}

fn fetch_claims(
    client: &dyn ClusterQuery,
    selector: Option<&LabelSelector>,
) -> Result<Vec<RawVolumeClaim>, ReconError> {
    let records = client.query(ResourceKind::VolumeClaim, selector)?;
    let claims = records
        .iter()
        .map(RawVolumeClaim::from_value)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(claims)
}

// ── Page operations ────────────────────────────────────────────────

/// The databases page: all three database kinds in order, then the ceph
/// cross-reference.
pub fn database_view(
    client: &dyn ClusterQuery,
    storage: &StorageClasses,
) -> Result<Vec<NamespaceGroup>, ReconError> {
    let mut groups = Vec::new();
    for kind in DatabaseKind::ALL {
        groups = fetch_databases(client, kind, groups)?;
    }
    merge_dc_with_ceph_pvc(client, storage, &groups)
}

/// The NFS page: non-backed-up claims first, then backed-up claims merged
/// into the same namespace view.
pub fn nfs_view(
    client: &dyn ClusterQuery,
    storage: &StorageClasses,
) -> Result<Vec<NamespaceGroup>, ReconError> {
    let groups = fetch_nfs(client, storage, false, Vec::new())?;
    fetch_nfs(client, storage, true, groups)
}
