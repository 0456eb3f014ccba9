//! Managed devices enrolled in Intune.
//!
//! Entity set: `deviceManagement/managedDevices/{managedDevice-id}`.
//!
//! Besides the generic list / get / update / delete operations, a managed
//! device exposes remote actions. All of them are POSTs that answer
//! `204 No Content`; the device picks the action up on its next check-in.
//!
//! | Method | Action | Body |
//! |--------|--------|------|
//! | [`retire`](ItemRequestBuilder::retire) | `retire` | none |
//! | [`wipe`](ItemRequestBuilder::wipe) | `wipe` | [`WipeRequest`] |
//! | [`sync_device`](ItemRequestBuilder::sync_device) | `syncDevice` | none |
//! | [`reboot_now`](ItemRequestBuilder::reboot_now) | `rebootNow` | none |
//! | [`remote_lock`](ItemRequestBuilder::remote_lock) | `remoteLock` | none |
//! | [`shut_down`](ItemRequestBuilder::shut_down) | `shutDown` | none |
//! | [`locate_device`](ItemRequestBuilder::locate_device) | `locateDevice` | none |
//! | [`reset_passcode`](ItemRequestBuilder::reset_passcode) | `resetPasscode` | none |
//! | [`clean_windows_device`](ItemRequestBuilder::clean_windows_device) | `cleanWindowsDevice` | [`CleanWindowsDeviceRequest`] |
//! | [`windows_defender_scan`](ItemRequestBuilder::windows_defender_scan) | `windowsDefenderScan` | [`WindowsDefenderScanRequest`] |
//!
//! Permissions: `DeviceManagementManagedDevices.Read.All` for reads,
//! `DeviceManagementManagedDevices.PrivilegedOperations.All` for actions.

use serde::{Deserialize, Serialize};

use crate::builder::{CollectionRequestBuilder, ItemRequestBuilder};
use crate::error::Result;
use crate::request::{RequestConfiguration, RequestInformation};

pub(crate) const TEMPLATE: &str = "deviceManagement/managedDevices";
pub(crate) const ITEM_PARAMETER: &str = "managedDevice-id";

/// `deviceManagement/managedDevices`.
pub type ManagedDevicesRequestBuilder<'a> = CollectionRequestBuilder<'a, ManagedDevice>;
/// `deviceManagement/managedDevices/{id}`.
pub type ManagedDeviceItemRequestBuilder<'a> = ItemRequestBuilder<'a, ManagedDevice>;

// ── Enums ──────────────────────────────────────────────────────────────

/// Compliance state of a managed device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComplianceState {
    /// Not evaluated yet.
    Unknown,
    /// Meets every assigned policy.
    Compliant,
    /// Fails at least one assigned policy.
    Noncompliant,
    /// Assigned policies conflict.
    Conflict,
    /// Evaluation failed.
    Error,
    /// Noncompliant but still inside the grace period.
    InGracePeriod,
    /// Compliance is managed by Configuration Manager.
    ConfigManager,
    /// Also absorbs any value added to the service after this crate.
    #[serde(other)]
    UnknownFutureValue,
}

/// Who owns a managed device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ManagedDeviceOwnerType {
    /// Not reported.
    Unknown,
    /// Corporate-owned.
    Company,
    /// Bring your own device.
    Personal,
    /// A value this crate does not know yet.
    #[serde(other)]
    UnknownFutureValue,
}

/// The agent that manages a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ManagementAgentType {
    /// Exchange ActiveSync.
    Eas,
    /// Intune MDM.
    Mdm,
    /// Exchange ActiveSync and Intune MDM.
    EasMdm,
    /// Intune PC client.
    IntuneClient,
    /// Exchange ActiveSync and the Intune PC client.
    EasIntuneClient,
    /// Configuration Manager client.
    ConfigurationManagerClient,
    /// Configuration Manager client and Intune MDM.
    ConfigurationManagerClientMdm,
    /// Configuration Manager, Intune MDM and Exchange ActiveSync.
    ConfigurationManagerClientMdmEas,
    /// Not reported.
    Unknown,
    /// Jamf for macOS.
    Jamf,
    /// Google Cloud device policy controller.
    GoogleCloudDevicePolicyController,
    /// A value this crate does not know yet.
    #[serde(other)]
    UnknownFutureValue,
}

// ── Model ──────────────────────────────────────────────────────────────

/// A device managed or pre-managed by Intune.
///
/// Every field is optional so the same type works as a sparse PATCH body.
/// Only `notes` and a handful of category fields are writable in v1.0.
///
/// Reference: <https://learn.microsoft.com/en-us/graph/api/resources/intune-devices-manageddevice>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedDevice {
    /// Device ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Entra ID object ID of the primary user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Name of the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,

    /// Corporate or personal ownership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_device_owner_type: Option<ManagedDeviceOwnerType>,

    /// RFC 3339 enrollment timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrolled_date_time: Option<String>,

    /// RFC 3339 timestamp of the last check-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync_date_time: Option<String>,

    /// e.g. `"Windows"`, `"iOS"`, `"Android"`, `"macOS"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<String>,

    /// Aggregate compliance state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_state: Option<ComplianceState>,

    /// `"True"`, `"False"` or `"Unknown"`; Graph models this as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jail_broken: Option<String>,

    /// The agent that manages the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_agent: Option<ManagementAgentType>,

    /// OS version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,

    /// Whether Exchange ActiveSync is activated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eas_activated: Option<bool>,

    /// Exchange ActiveSync device ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eas_device_id: Option<String>,

    /// Whether the device is registered in Entra ID.
    #[serde(rename = "azureADRegistered", default, skip_serializing_if = "Option::is_none")]
    pub azure_ad_registered: Option<bool>,

    /// Entra ID device ID.
    #[serde(rename = "azureADDeviceId", default, skip_serializing_if = "Option::is_none")]
    pub azure_ad_device_id: Option<String>,

    /// How the device was enrolled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_enrollment_type: Option<String>,

    /// Entra ID registration state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_registration_state: Option<String>,

    /// Device category name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_category_display_name: Option<String>,

    /// Email address of the primary user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,

    /// UPN of the primary user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_principal_name: Option<String>,

    /// Display name of the primary user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_display_name: Option<String>,

    /// Name generated by Intune.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_device_name: Option<String>,

    /// Whether an iOS device is supervised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_supervised: Option<bool>,

    /// Whether storage is encrypted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_encrypted: Option<bool>,

    /// Hardware model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Hardware manufacturer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    /// IMEI of cellular devices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imei: Option<String>,

    /// Serial number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    /// Wi-Fi MAC address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wi_fi_mac_address: Option<String>,

    /// Total storage in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_storage_space_in_bytes: Option<i64>,

    /// Free storage in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_storage_space_in_bytes: Option<i64>,

    /// Threat state reported by a Mobile Threat Defense partner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_reported_threat_state: Option<String>,

    /// Free-form admin notes. Writable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Per-policy compliance state reported by a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCompliancePolicyState {
    /// State ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Policy name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Policy version that was evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,

    /// Platform the policy targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_type: Option<String>,

    /// Evaluation result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ComplianceState>,

    /// Number of settings evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setting_count: Option<i32>,
}

// ── Action bodies ──────────────────────────────────────────────────────

/// Body of the `wipe` action. Omitted fields take the service defaults
/// (a full factory reset).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WipeRequest {
    /// Keep the device enrolled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_enrollment_data: Option<bool>,

    /// Keep user data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_user_data: Option<bool>,

    /// Six digit unlock PIN, required for some macOS wipes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_os_unlock_code: Option<String>,

    /// Keep the eSIM data plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist_esim_data_plan: Option<bool>,
}

/// Body of the `cleanWindowsDevice` action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanWindowsDeviceRequest {
    /// Keep user data.
    pub keep_user_data: bool,
}

/// Body of the `windowsDefenderScan` action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowsDefenderScanRequest {
    /// `true` for a quick scan, `false` for a full scan.
    pub quick_scan: bool,
}

// ── Builder operations ─────────────────────────────────────────────────

impl<'a> ItemRequestBuilder<'a, ManagedDevice> {
    /// Builds the `retire` POST without sending it.
    pub fn to_retire_request(&self, config: Option<&RequestConfiguration>) -> RequestInformation {
        self.to_action_request("retire", config)
    }

    /// Removes company data and unenrolls the device, leaving personal data.
    pub async fn retire(&self, config: Option<&RequestConfiguration>) -> Result<()> {
        self.execute_no_content(&self.to_retire_request(config)).await
    }

    /// Builds the `wipe` POST without sending it.
    pub fn to_wipe_request(
        &self,
        request: &WipeRequest,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        self.to_action_request_with_body("wipe", request, config)
    }

    /// Factory-resets the device (or keeps data, per `request`).
    pub async fn wipe(&self, request: &WipeRequest, config: Option<&RequestConfiguration>) -> Result<()> {
        self.execute_no_content(&self.to_wipe_request(request, config)?).await
    }

    /// Builds the `syncDevice` POST without sending it.
    pub fn to_sync_device_request(&self, config: Option<&RequestConfiguration>) -> RequestInformation {
        self.to_action_request("syncDevice", config)
    }

    /// Asks the device to check in with Intune immediately.
    pub async fn sync_device(&self, config: Option<&RequestConfiguration>) -> Result<()> {
        self.execute_no_content(&self.to_sync_device_request(config)).await
    }

    /// Builds the `rebootNow` POST without sending it.
    pub fn to_reboot_now_request(&self, config: Option<&RequestConfiguration>) -> RequestInformation {
        self.to_action_request("rebootNow", config)
    }

    /// Restarts the device.
    pub async fn reboot_now(&self, config: Option<&RequestConfiguration>) -> Result<()> {
        self.execute_no_content(&self.to_reboot_now_request(config)).await
    }

    /// Builds the `remoteLock` POST without sending it.
    pub fn to_remote_lock_request(&self, config: Option<&RequestConfiguration>) -> RequestInformation {
        self.to_action_request("remoteLock", config)
    }

    /// Locks the screen.
    pub async fn remote_lock(&self, config: Option<&RequestConfiguration>) -> Result<()> {
        self.execute_no_content(&self.to_remote_lock_request(config)).await
    }

    /// Builds the `shutDown` POST without sending it.
    pub fn to_shut_down_request(&self, config: Option<&RequestConfiguration>) -> RequestInformation {
        self.to_action_request("shutDown", config)
    }

    /// Powers the device off.
    pub async fn shut_down(&self, config: Option<&RequestConfiguration>) -> Result<()> {
        self.execute_no_content(&self.to_shut_down_request(config)).await
    }

    /// Builds the `locateDevice` POST without sending it.
    pub fn to_locate_device_request(&self, config: Option<&RequestConfiguration>) -> RequestInformation {
        self.to_action_request("locateDevice", config)
    }

    /// Supervised iOS/iPadOS and Windows only.
    pub async fn locate_device(&self, config: Option<&RequestConfiguration>) -> Result<()> {
        self.execute_no_content(&self.to_locate_device_request(config)).await
    }

    /// Builds the `resetPasscode` POST without sending it.
    pub fn to_reset_passcode_request(&self, config: Option<&RequestConfiguration>) -> RequestInformation {
        self.to_action_request("resetPasscode", config)
    }

    /// Clears the device passcode.
    pub async fn reset_passcode(&self, config: Option<&RequestConfiguration>) -> Result<()> {
        self.execute_no_content(&self.to_reset_passcode_request(config)).await
    }

    /// Builds the `cleanWindowsDevice` POST without sending it.
    pub fn to_clean_windows_device_request(
        &self,
        request: &CleanWindowsDeviceRequest,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        self.to_action_request_with_body("cleanWindowsDevice", request, config)
    }

    /// Windows "Fresh Start": reinstalls Windows and removes OEM apps.
    pub async fn clean_windows_device(
        &self,
        request: &CleanWindowsDeviceRequest,
        config: Option<&RequestConfiguration>,
    ) -> Result<()> {
        self.execute_no_content(&self.to_clean_windows_device_request(request, config)?)
            .await
    }

    /// Builds the `windowsDefenderScan` POST without sending it.
    pub fn to_windows_defender_scan_request(
        &self,
        request: &WindowsDefenderScanRequest,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        self.to_action_request_with_body("windowsDefenderScan", request, config)
    }

    /// Starts a quick or full Microsoft Defender scan.
    pub async fn windows_defender_scan(
        &self,
        request: &WindowsDefenderScanRequest,
        config: Option<&RequestConfiguration>,
    ) -> Result<()> {
        self.execute_no_content(&self.to_windows_defender_scan_request(request, config)?)
            .await
    }

    /// Compliance state of this device for each assigned policy.
    pub fn device_compliance_policy_states(
        &self,
    ) -> CollectionRequestBuilder<'a, DeviceCompliancePolicyState> {
        self.collection("deviceCompliancePolicyStates", "deviceCompliancePolicyState-id")
    }
}
