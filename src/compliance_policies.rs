//! Device compliance policies.
//!
//! Entity set: `deviceManagement/deviceCompliancePolicies/{deviceCompliancePolicy-id}`.
//! Polymorphic like configuration profiles; see [`DeviceCompliancePolicy`].

use serde::{Deserialize, Serialize};

use crate::assignment::{AssignRequest, Assignment};
use crate::builder::{CollectionRequestBuilder, ItemRequestBuilder};
use crate::discriminator::discriminated_union;
use crate::error::Result;
use crate::odata::ODataCollection;
use crate::request::{RequestConfiguration, RequestInformation};

pub(crate) const TEMPLATE: &str = "deviceManagement/deviceCompliancePolicies";
pub(crate) const ITEM_PARAMETER: &str = "deviceCompliancePolicy-id";

/// `deviceManagement/deviceCompliancePolicies`.
pub type DeviceCompliancePoliciesRequestBuilder<'a> =
    CollectionRequestBuilder<'a, DeviceCompliancePolicy>;
/// `deviceManagement/deviceCompliancePolicies/{id}`.
pub type DeviceCompliancePolicyItemRequestBuilder<'a> =
    ItemRequestBuilder<'a, DeviceCompliancePolicy>;

/// Properties every compliance policy shares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCompliancePolicyBase {
    /// Policy ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Admin-facing name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Admin-facing description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// RFC 3339 creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<String>,

    /// RFC 3339 timestamp of the last change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date_time: Option<String>,

    /// Incremented on every change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

/// `#microsoft.graph.windows10CompliancePolicy`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Windows10CompliancePolicy {
    /// Shared properties.
    #[serde(flatten)]
    pub base: DeviceCompliancePolicyBase,

    /// Require a password to unlock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_required: Option<bool>,

    /// Minimum password length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_minimum_length: Option<i32>,

    /// Require the device to be reported healthy by Health Attestation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_healthy_device_report: Option<bool>,

    /// Lowest allowed OS version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_minimum_version: Option<String>,

    /// Require BitLocker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_locker_enabled: Option<bool>,

    /// Require Secure Boot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_boot_enabled: Option<bool>,

    /// Require encrypted storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_require_encryption: Option<bool>,
}

/// `#microsoft.graph.iosCompliancePolicy`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IosCompliancePolicy {
    /// Shared properties.
    #[serde(flatten)]
    pub base: DeviceCompliancePolicyBase,

    /// Require a passcode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passcode_required: Option<bool>,

    /// Minimum passcode length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passcode_minimum_length: Option<i32>,

    /// Lowest allowed iOS version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_minimum_version: Option<String>,

    /// Mark jailbroken devices noncompliant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_block_jailbroken_devices: Option<bool>,

    /// Require a managed email profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_email_profile_required: Option<bool>,
}

/// `#microsoft.graph.androidCompliancePolicy`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidCompliancePolicy {
    /// Shared properties.
    #[serde(flatten)]
    pub base: DeviceCompliancePolicyBase,

    /// Require a password to unlock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_required: Option<bool>,

    /// Minimum password length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_minimum_length: Option<i32>,

    /// Mark rooted devices noncompliant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_block_jailbroken_devices: Option<bool>,

    /// Require encrypted storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_require_encryption: Option<bool>,

    /// Oldest allowed security patch level, e.g. `2024-01-01`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_android_security_patch_level: Option<String>,
}

discriminated_union! {
    /// A compliance policy of any platform.
    pub enum DeviceCompliancePolicy {
        Windows10(Windows10CompliancePolicy) = "microsoft.graph.windows10CompliancePolicy",
        Ios(IosCompliancePolicy) = "microsoft.graph.iosCompliancePolicy",
        Android(AndroidCompliancePolicy) = "microsoft.graph.androidCompliancePolicy",
    }
}

impl DeviceCompliancePolicy {
    /// Properties shared by every platform; `None` for `Other`.
    pub fn base(&self) -> Option<&DeviceCompliancePolicyBase> {
        match self {
            DeviceCompliancePolicy::Windows10(p) => Some(&p.base),
            DeviceCompliancePolicy::Ios(p) => Some(&p.base),
            DeviceCompliancePolicy::Android(p) => Some(&p.base),
            DeviceCompliancePolicy::Other(_) => None,
        }
    }

    /// Policy ID, also read from unmodelled payloads.
    pub fn id(&self) -> Option<&str> {
        match self {
            DeviceCompliancePolicy::Other(map) => map.get("id").and_then(|v| v.as_str()),
            _ => self.base().and_then(|b| b.id.as_deref()),
        }
    }

    /// Policy name, also read from unmodelled payloads.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            DeviceCompliancePolicy::Other(map) => map.get("displayName").and_then(|v| v.as_str()),
            _ => self.base().and_then(|b| b.display_name.as_deref()),
        }
    }
}

// ── Scheduled actions ──────────────────────────────────────────────────

/// What happens to a noncompliant device once the grace period runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceComplianceActionType {
    /// Do nothing.
    NoAction,
    /// Email the user.
    Notification,
    /// Block access to corporate resources.
    Block,
    /// Remove company data.
    Retire,
    /// Factory reset.
    Wipe,
    /// Remove resource access profiles.
    RemoveResourceAccessProfiles,
    /// Send a push notification.
    PushNotification,
    /// An action this crate does not know yet.
    #[serde(other)]
    UnknownFutureValue,
}

/// One scheduled action of a compliance rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceComplianceActionItem {
    /// What to do.
    pub action_type: DeviceComplianceActionType,

    /// Hours after the device turns noncompliant before the action runs.
    #[serde(default)]
    pub grace_period_hours: i32,

    /// Required for `notification` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_template_id: Option<String>,

    /// Group IDs that receive a copy of the notification.
    #[serde(rename = "notificationMessageCCList", default, skip_serializing_if = "Vec::is_empty")]
    pub notification_message_cc_list: Vec<String>,
}

/// The scheduled actions for one compliance rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceComplianceScheduledActionForRule {
    /// Only `PasswordRequired` is accepted by the service today.
    pub rule_name: String,

    /// Actions run for this rule, in any order.
    pub scheduled_action_configurations: Vec<DeviceComplianceActionItem>,
}

/// Body of `scheduleActionsForRules`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleActionsForRulesRequest {
    /// Replaces the existing scheduled actions.
    pub device_compliance_scheduled_action_for_rules: Vec<DeviceComplianceScheduledActionForRule>,
}

// ── Device statuses ────────────────────────────────────────────────────

/// Evaluation result of a policy on one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComplianceStatus {
    /// Not evaluated yet.
    Unknown,
    /// The policy does not apply to the device.
    NotApplicable,
    /// Meets every rule.
    Compliant,
    /// Was fixed automatically.
    Remediated,
    /// Fails at least one rule.
    NonCompliant,
    /// Evaluation failed.
    Error,
    /// Conflicts with another policy.
    Conflict,
    /// The policy is not assigned to the device.
    NotAssigned,
    /// A status this crate does not know yet.
    #[serde(other)]
    UnknownFutureValue,
}

/// How one device evaluates against a policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceComplianceDeviceStatus {
    /// Status ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Device name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_display_name: Option<String>,

    /// Name of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// Hardware model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,

    /// UPN of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_principal_name: Option<String>,

    /// Evaluation result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ComplianceStatus>,

    /// RFC 3339 timestamp of the last report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reported_date_time: Option<String>,

    /// When the grace period ends for a noncompliant device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_grace_period_expiration_date_time: Option<String>,
}

// ── Builder operations ─────────────────────────────────────────────────

impl<'a> ItemRequestBuilder<'a, DeviceCompliancePolicy> {
    /// Builds the `assign` POST without sending it.
    pub fn to_assign_request(
        &self,
        request: &AssignRequest,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        self.to_action_request_with_body("assign", request, config)
    }

    /// Replaces the policy's assignments; returns them as stored.
    pub async fn assign(
        &self,
        request: &AssignRequest,
        config: Option<&RequestConfiguration>,
    ) -> Result<Vec<Assignment>> {
        let assigned: ODataCollection<Assignment> =
            self.execute_json(&self.to_assign_request(request, config)?).await?;
        Ok(assigned.value)
    }

    /// The policy's current assignments.
    pub fn assignments(&self) -> CollectionRequestBuilder<'a, Assignment> {
        self.collection("assignments", "deviceCompliancePolicyAssignment-id")
    }

    /// Builds the `scheduleActionsForRules` POST without sending it.
    pub fn to_schedule_actions_for_rules_request(
        &self,
        request: &ScheduleActionsForRulesRequest,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        self.to_action_request_with_body("scheduleActionsForRules", request, config)
    }

    /// Replaces the scheduled actions for noncompliance.
    pub async fn schedule_actions_for_rules(
        &self,
        request: &ScheduleActionsForRulesRequest,
        config: Option<&RequestConfiguration>,
    ) -> Result<()> {
        self.execute_no_content(&self.to_schedule_actions_for_rules_request(request, config)?)
            .await
    }

    /// Per-device evaluation results for this policy.
    pub fn device_statuses(&self) -> CollectionRequestBuilder<'a, DeviceComplianceDeviceStatus> {
        self.collection("deviceStatuses", "deviceComplianceDeviceStatus-id")
    }
}
