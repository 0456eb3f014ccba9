//! Assignment targets shared by device configurations and compliance policies.
//!
//! Both resources expose an `assign` action taking
//! `{ "assignments": [ { "target": { "@odata.type": ..., ... } } ] }` and
//! an `assignments` navigation property with the same item shape.

use serde::{Deserialize, Serialize};

use crate::discriminator::discriminated_union;

/// Targets the members of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAssignmentTarget {
    /// Entra ID group object ID.
    pub group_id: String,
}

/// Excludes the members of one group from the other targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionGroupAssignmentTarget {
    /// Entra ID group object ID.
    pub group_id: String,
}

/// Every enrolled device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllDevicesAssignmentTarget {}

/// Every user with an Intune license.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllLicensedUsersAssignmentTarget {}

discriminated_union! {
    /// Who a configuration or policy applies to.
    pub enum AssignmentTarget {
        Group(GroupAssignmentTarget) = "microsoft.graph.groupAssignmentTarget",
        ExclusionGroup(ExclusionGroupAssignmentTarget) = "microsoft.graph.exclusionGroupAssignmentTarget",
        AllDevices(AllDevicesAssignmentTarget) = "microsoft.graph.allDevicesAssignmentTarget",
        AllLicensedUsers(AllLicensedUsersAssignmentTarget) = "microsoft.graph.allLicensedUsersAssignmentTarget",
    }
}

impl AssignmentTarget {
    /// Include a group.
    pub fn group(group_id: &str) -> Self {
        AssignmentTarget::Group(GroupAssignmentTarget {
            group_id: group_id.to_string(),
        })
    }

    /// Exclude a group.
    pub fn exclude_group(group_id: &str) -> Self {
        AssignmentTarget::ExclusionGroup(ExclusionGroupAssignmentTarget {
            group_id: group_id.to_string(),
        })
    }

    /// Include all devices.
    pub fn all_devices() -> Self {
        AssignmentTarget::AllDevices(AllDevicesAssignmentTarget {})
    }

    /// Include all licensed users.
    pub fn all_licensed_users() -> Self {
        AssignmentTarget::AllLicensedUsers(AllLicensedUsersAssignmentTarget {})
    }
}

/// One assignment of a configuration or compliance policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Assigned by the service; leave `None` when assigning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Who receives the configuration or policy.
    pub target: AssignmentTarget,
}

impl Assignment {
    /// A new assignment with no ID yet.
    pub fn new(target: AssignmentTarget) -> Self {
        Assignment { id: None, target }
    }
}

/// Body of the `assign` action. The list replaces every existing assignment.
#[derive(Debug, Clone, Serialize)]
pub struct AssignRequest {
    /// The complete new assignment list.
    pub assignments: Vec<Assignment>,
}
