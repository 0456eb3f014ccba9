//! Device configuration profiles.
//!
//! Entity set: `deviceManagement/deviceConfigurations/{deviceConfiguration-id}`.
//!
//! The set is polymorphic: one list mixes Windows, iOS and Android profiles,
//! so items deserialize into [`DeviceConfiguration`], keyed on
//! `@odata.type`. Profile types this crate does not model land in
//! [`DeviceConfiguration::Other`] with their JSON intact.
//!
//! # Operations
//!
//! - `assign` replaces every assignment of a profile and returns the new set.
//! - `assignments` is the read side of the same data.
//! - `getOmaSettingPlainTextValue` reveals an encrypted custom OMA-URI value.

use serde::{Deserialize, Serialize};

use crate::assignment::{AssignRequest, Assignment};
use crate::builder::{CollectionRequestBuilder, ItemRequestBuilder};
use crate::discriminator::discriminated_union;
use crate::error::Result;
use crate::odata::{ODataCollection, PrimitiveValue};
use crate::request::{RequestConfiguration, RequestInformation};

pub(crate) const TEMPLATE: &str = "deviceManagement/deviceConfigurations";
pub(crate) const ITEM_PARAMETER: &str = "deviceConfiguration-id";

/// Builder for `deviceManagement/deviceConfigurations`.
pub type DeviceConfigurationsRequestBuilder<'a> = CollectionRequestBuilder<'a, DeviceConfiguration>;
/// Builder for one configuration profile.
pub type DeviceConfigurationItemRequestBuilder<'a> = ItemRequestBuilder<'a, DeviceConfiguration>;

// ── Models ─────────────────────────────────────────────────────────────

/// Properties every configuration profile carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfigurationBase {
    /// Service-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Name shown in the Intune portal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Admin-provided description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// ISO 8601 creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<String>,

    /// ISO 8601 time of the last change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date_time: Option<String>,

    /// Bumped by the service on every change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

/// Windows 10 device restrictions profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Windows10GeneralConfiguration {
    /// Shared profile properties.
    #[serde(flatten)]
    pub base: DeviceConfigurationBase,

    /// Require a password to unlock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_required: Option<bool>,

    /// Minimum password length, 4 to 16.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_minimum_length: Option<i32>,

    /// Block `1234`-style passwords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_block_simple: Option<bool>,

    /// Idle minutes before the screen locks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_minutes_of_inactivity_before_screen_timeout: Option<i32>,

    /// Require storage encryption on Windows 10 Mobile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_require_mobile_device_encryption: Option<bool>,

    /// Keep Defender real-time monitoring on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defender_require_real_time_monitoring: Option<bool>,

    /// Disable Bluetooth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bluetooth_blocked: Option<bool>,

    /// Disable the camera.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_blocked: Option<bool>,

    /// Disable screenshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_capture_blocked: Option<bool>,
}

/// Tri-state used by many Windows policy settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateManagementSetting {
    /// Left to the device default.
    NotConfigured,
    /// Forced off.
    Blocked,
    /// Forced on.
    Allowed,
    /// A value added to the service after this crate was built.
    #[serde(other)]
    UnknownFutureValue,
}

/// Windows Defender Firewall settings for one network profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowsFirewallNetworkProfile {
    /// Turn the firewall on or off for this profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_enabled: Option<StateManagementSetting>,

    /// Block all inbound connections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound_connections_blocked: Option<bool>,

    /// Block all outbound connections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbound_connections_blocked: Option<bool>,

    /// Suppress "app was blocked" notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound_notifications_blocked: Option<bool>,

    /// Do not answer unsolicited inbound traffic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stealth_mode_blocked: Option<bool>,
}

/// Windows 10 endpoint protection profile: Application Guard, BitLocker,
/// Defender exploit guard, firewall and SmartScreen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Windows10EndpointProtectionConfiguration {
    /// Shared profile properties.
    #[serde(flatten)]
    pub base: DeviceConfigurationBase,

    /// Run Edge in an Application Guard container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_guard_enabled: Option<bool>,

    /// Let the container print to PDF.
    #[serde(
        rename = "applicationGuardAllowPrintToPDF",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub application_guard_allow_print_to_pdf: Option<bool>,

    /// Block content from sites outside the enterprise boundary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_guard_block_non_enterprise_content: Option<bool>,

    /// Encrypt the OS and fixed drives with BitLocker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_locker_encrypt_device: Option<bool>,

    /// Hide the prompt about third-party disk encryption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_locker_disable_warning_for_other_disk_encryption: Option<bool>,

    /// Extra folders protected by controlled folder access.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defender_additional_guarded_folders: Vec<String>,

    /// Paths excluded from attack surface reduction rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defender_attack_surface_reduction_excluded_paths: Vec<String>,

    /// Stop users from overriding exploit protection in Security Center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defender_security_center_block_exploit_protection_override: Option<bool>,

    /// Block stateful FTP.
    #[serde(
        rename = "firewallBlockStatefulFTP",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub firewall_block_stateful_ftp: Option<bool>,

    /// Firewall settings for domain networks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_profile_domain: Option<WindowsFirewallNetworkProfile>,

    /// Firewall settings for private networks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_profile_private: Option<WindowsFirewallNetworkProfile>,

    /// Firewall settings for public networks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_profile_public: Option<WindowsFirewallNetworkProfile>,

    /// Turn SmartScreen on in the shell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smart_screen_enable_in_shell: Option<bool>,

    /// Stop users from ignoring SmartScreen file warnings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smart_screen_block_override_for_files: Option<bool>,
}

/// iOS/iPadOS device restrictions profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IosGeneralDeviceConfiguration {
    /// Shared profile properties.
    #[serde(flatten)]
    pub base: DeviceConfigurationBase,

    /// Require a passcode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passcode_required: Option<bool>,

    /// Minimum passcode length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passcode_minimum_length: Option<i32>,

    /// Block simple passcodes such as `1111`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passcode_block_simple: Option<bool>,

    /// Disable the camera.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_blocked: Option<bool>,

    /// Hide the App Store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_store_blocked: Option<bool>,

    /// Block iCloud backup.
    #[serde(rename = "iCloudBlockBackup", default, skip_serializing_if = "Option::is_none")]
    pub icloud_block_backup: Option<bool>,
}

/// Android device administrator restrictions profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidGeneralDeviceConfiguration {
    /// Shared profile properties.
    #[serde(flatten)]
    pub base: DeviceConfigurationBase,

    /// Require a password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_required: Option<bool>,

    /// Minimum password length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_minimum_length: Option<i32>,

    /// Disable the camera.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_blocked: Option<bool>,

    /// Disable Bluetooth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bluetooth_blocked: Option<bool>,

    /// Require storage encryption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_require_device_encryption: Option<bool>,
}

/// Windows 10 custom profile: a list of raw OMA-URI settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Windows10CustomConfiguration {
    /// Shared profile properties.
    #[serde(flatten)]
    pub base: DeviceConfigurationBase,

    /// The OMA-URI settings, in portal order.
    #[serde(default)]
    pub oma_settings: Vec<OmaSetting>,
}

discriminated_union! {
    /// A device configuration profile of any platform.
    pub enum DeviceConfiguration {
        Windows10General(Windows10GeneralConfiguration) = "microsoft.graph.windows10GeneralConfiguration",
        Windows10EndpointProtection(Windows10EndpointProtectionConfiguration) = "microsoft.graph.windows10EndpointProtectionConfiguration",
        IosGeneral(IosGeneralDeviceConfiguration) = "microsoft.graph.iosGeneralDeviceConfiguration",
        AndroidGeneral(AndroidGeneralDeviceConfiguration) = "microsoft.graph.androidGeneralDeviceConfiguration",
        Windows10Custom(Windows10CustomConfiguration) = "microsoft.graph.windows10CustomConfiguration",
    }
}

impl DeviceConfiguration {
    /// The shared properties, or `None` for an unmodelled profile type.
    pub fn base(&self) -> Option<&DeviceConfigurationBase> {
        match self {
            DeviceConfiguration::Windows10General(c) => Some(&c.base),
            DeviceConfiguration::Windows10EndpointProtection(c) => Some(&c.base),
            DeviceConfiguration::IosGeneral(c) => Some(&c.base),
            DeviceConfiguration::AndroidGeneral(c) => Some(&c.base),
            DeviceConfiguration::Windows10Custom(c) => Some(&c.base),
            DeviceConfiguration::Other(_) => None,
        }
    }

    /// Profile id, read from the raw JSON for unmodelled types.
    pub fn id(&self) -> Option<&str> {
        match self {
            DeviceConfiguration::Other(map) => map.get("id").and_then(|v| v.as_str()),
            _ => self.base().and_then(|b| b.id.as_deref()),
        }
    }

    /// Display name, read from the raw JSON for unmodelled types.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            DeviceConfiguration::Other(map) => map.get("displayName").and_then(|v| v.as_str()),
            _ => self.base().and_then(|b| b.display_name.as_deref()),
        }
    }
}

/// String-valued OMA-URI setting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OmaSettingString {
    /// Name shown in the portal.
    pub display_name: String,

    /// Admin-provided description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// e.g. `./Vendor/MSFT/Policy/Config/Start/HideShutDown`.
    pub oma_uri: String,

    /// Redacted (`"****"`) by the service when `is_encrypted` is set.
    pub value: String,

    /// Whether the service stores the value encrypted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_encrypted: Option<bool>,

    /// Pass to `get_oma_setting_plain_text_value` to read an encrypted value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_reference_value_id: Option<String>,
}

/// Integer-valued OMA-URI setting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OmaSettingInteger {
    /// Name shown in the portal.
    pub display_name: String,

    /// Admin-provided description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Target OMA-URI.
    pub oma_uri: String,

    /// Value written to the node.
    pub value: i32,
}

/// Boolean-valued OMA-URI setting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OmaSettingBoolean {
    /// Name shown in the portal.
    pub display_name: String,

    /// Admin-provided description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Target OMA-URI.
    pub oma_uri: String,

    /// Value written to the node.
    pub value: bool,
}

discriminated_union! {
    /// One OMA-URI setting of a custom profile.
    pub enum OmaSetting {
        String(OmaSettingString) = "microsoft.graph.omaSettingString",
        Integer(OmaSettingInteger) = "microsoft.graph.omaSettingInteger",
        Boolean(OmaSettingBoolean) = "microsoft.graph.omaSettingBoolean",
    }
}

// ── Builder operations ─────────────────────────────────────────────────

impl<'a> ItemRequestBuilder<'a, DeviceConfiguration> {
    /// Builds the `assign` POST without sending it.
    pub fn to_assign_request(
        &self,
        request: &AssignRequest,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        self.to_action_request_with_body("assign", request, config)
    }

    /// Replaces the profile's assignments; returns them as stored.
    pub async fn assign(
        &self,
        request: &AssignRequest,
        config: Option<&RequestConfiguration>,
    ) -> Result<Vec<Assignment>> {
        let assigned: ODataCollection<Assignment> =
            self.execute_json(&self.to_assign_request(request, config)?).await?;
        Ok(assigned.value)
    }

    /// The profile's current assignments.
    pub fn assignments(&self) -> CollectionRequestBuilder<'a, Assignment> {
        self.collection("assignments", "deviceConfigurationAssignment-id")
    }

    /// Builds the `getOmaSettingPlainTextValue` GET without sending it.
    pub fn to_get_oma_setting_plain_text_value_request(
        &self,
        secret_reference_value_id: &str,
        config: Option<&RequestConfiguration>,
    ) -> RequestInformation {
        self.to_function_request(
            "getOmaSettingPlainTextValue(secretReferenceValueId='{secretReferenceValueId}')",
            &[("secretReferenceValueId", secret_reference_value_id)],
            config,
        )
    }

    /// Reads the decrypted value of an encrypted OMA-URI string setting.
    pub async fn get_oma_setting_plain_text_value(
        &self,
        secret_reference_value_id: &str,
        config: Option<&RequestConfiguration>,
    ) -> Result<String> {
        let info = self.to_get_oma_setting_plain_text_value_request(secret_reference_value_id, config);
        let value: PrimitiveValue<String> = self.execute_json(&info).await?;
        Ok(value.value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::adapter::testing::FakeAdapter;
    use crate::assignment::AssignmentTarget;
    use crate::request::PathParameters;

    fn configurations(adapter: &FakeAdapter) -> DeviceConfigurationsRequestBuilder<'_> {
        CollectionRequestBuilder::new(adapter, TEMPLATE, ITEM_PARAMETER, PathParameters::new())
    }

    #[tokio::test]
    async fn mixed_platform_list_picks_variants() {
        let adapter = FakeAdapter::default().respond(
            200,
            r##"{"value": [
                {"@odata.type": "#microsoft.graph.windows10GeneralConfiguration",
                 "id": "w1", "displayName": "Win baseline", "version": 3,
                 "passwordRequired": true, "passwordMinimumLength": 12},
                {"@odata.type": "#microsoft.graph.iosGeneralDeviceConfiguration",
                 "id": "i1", "displayName": "iOS baseline",
                 "passcodeRequired": true, "iCloudBlockBackup": true},
                {"@odata.type": "#microsoft.graph.macOSGeneralDeviceConfiguration",
                 "id": "m1", "displayName": "macOS baseline"}
            ]}"##,
        );
        let page = configurations(&adapter).list(None).await.unwrap();
        assert_eq!(page.value.len(), 3);

        let DeviceConfiguration::Windows10General(win) = &page.value[0] else {
            panic!("expected windows profile, got {:?}", page.value[0]);
        };
        assert_eq!(win.base.version, Some(3));
        assert_eq!(win.password_minimum_length, Some(12));

        let DeviceConfiguration::IosGeneral(ios) = &page.value[1] else {
            panic!("expected iOS profile, got {:?}", page.value[1]);
        };
        assert_eq!(ios.icloud_block_backup, Some(true));

        assert!(matches!(page.value[2], DeviceConfiguration::Other(_)));
        assert_eq!(page.value[2].id(), Some("m1"));
        assert_eq!(page.value[2].display_name(), Some("macOS baseline"));
    }

    #[test]
    fn custom_profile_round_trips_oma_settings() {
        let json = json!({
            "@odata.type": "#microsoft.graph.windows10CustomConfiguration",
            "id": "c1",
            "displayName": "Hide shutdown",
            "omaSettings": [
                {"@odata.type": "#microsoft.graph.omaSettingInteger",
                 "displayName": "HideShutDown",
                 "omaUri": "./Vendor/MSFT/Policy/Config/Start/HideShutDown",
                 "value": 1},
                {"@odata.type": "#microsoft.graph.omaSettingString",
                 "displayName": "Secret",
                 "omaUri": "./Vendor/MSFT/Thing",
                 "value": "****",
                 "isEncrypted": true,
                 "secretReferenceValueId": "sec-1"}
            ]
        });
        let config: DeviceConfiguration = serde_json::from_value(json.clone()).unwrap();
        let DeviceConfiguration::Windows10Custom(custom) = &config else {
            panic!("expected custom profile, got {config:?}");
        };
        assert!(matches!(custom.oma_settings[0], OmaSetting::Integer(ref s) if s.value == 1));
        assert!(matches!(
            custom.oma_settings[1],
            OmaSetting::String(ref s) if s.secret_reference_value_id.as_deref() == Some("sec-1")
        ));

        assert_eq!(serde_json::to_value(&config).unwrap(), json);
    }

    #[tokio::test]
    async fn assign_posts_targets_and_returns_assignments() {
        let adapter = FakeAdapter::default().respond(
            200,
            r##"{"value": [{"id": "c1_g1", "target": {
                "@odata.type": "#microsoft.graph.groupAssignmentTarget", "groupId": "g1"}}]}"##,
        );
        let request = AssignRequest {
            assignments: vec![Assignment::new(AssignmentTarget::group("g1"))],
        };
        let assigned = configurations(&adapter)
            .by_id("c1")
            .assign(&request, None)
            .await
            .unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].id.as_deref(), Some("c1_g1"));

        let seen = adapter.seen();
        assert_eq!(seen[0].0, "POST");
        assert!(seen[0].1.ends_with("/deviceConfigurations/c1/assign"));
        let body: serde_json::Value = serde_json::from_str(seen[0].2.as_deref().unwrap()).unwrap();
        assert_eq!(
            body["assignments"][0]["target"]["@odata.type"],
            "#microsoft.graph.groupAssignmentTarget"
        );
    }

    #[tokio::test]
    async fn plain_text_value_uses_function_segment() {
        let adapter = FakeAdapter::default().respond(200, r#"{"value": "hunter2"}"#);
        let value = configurations(&adapter)
            .by_id("c1")
            .get_oma_setting_plain_text_value("sec-1", None)
            .await
            .unwrap();
        assert_eq!(value, "hunter2");
        assert!(adapter.seen()[0].1.ends_with(
            "/deviceConfigurations/c1/getOmaSettingPlainTextValue(secretReferenceValueId='sec-1')"
        ));
    }

    #[test]
    fn assignments_collection_template() {
        let adapter = FakeAdapter::default();
        let item = configurations(&adapter).by_id("c1").assignments().by_id("a1");
        assert_eq!(
            item.url_template(),
            "deviceManagement/deviceConfigurations/{deviceConfiguration-id}/assignments/{deviceConfigurationAssignment-id}"
        );
    }

    #[test]
    fn endpoint_protection_profile_keeps_acronym_fields() {
        let json = json!({
            "@odata.type": "#microsoft.graph.windows10EndpointProtectionConfiguration",
            "id": "ep1",
            "displayName": "Endpoint protection",
            "applicationGuardEnabled": true,
            "applicationGuardAllowPrintToPDF": false,
            "bitLockerEncryptDevice": true,
            "defenderAdditionalGuardedFolders": ["C:\\Finance"],
            "firewallBlockStatefulFTP": true,
            "firewallProfilePublic": {
                "firewallEnabled": "allowed",
                "inboundConnectionsBlocked": true
            }
        });
        let config: DeviceConfiguration = serde_json::from_value(json.clone()).unwrap();
        let DeviceConfiguration::Windows10EndpointProtection(ep) = &config else {
            panic!("expected endpoint protection profile, got {config:?}");
        };
        assert_eq!(ep.application_guard_allow_print_to_pdf, Some(false));
        assert_eq!(ep.firewall_block_stateful_ftp, Some(true));
        assert_eq!(ep.defender_additional_guarded_folders, vec!["C:\\Finance"]);
        let public = ep.firewall_profile_public.as_ref().unwrap();
        assert_eq!(public.firewall_enabled, Some(StateManagementSetting::Allowed));
        assert_eq!(config.id(), Some("ep1"));

        assert_eq!(serde_json::to_value(&config).unwrap(), json);
    }

    #[test]
    fn action_and_function_requests_build_without_sending() {
        let adapter = FakeAdapter::default();
        let item = configurations(&adapter).by_id("c1");
        let request = AssignRequest {
            assignments: vec![Assignment::new(AssignmentTarget::all_devices())],
        };

        let assign = item.to_assign_request(&request, None).unwrap();
        assert_eq!(
            assign.url_template(),
            "deviceManagement/deviceConfigurations/{deviceConfiguration-id}/assign"
        );
        assert!(assign.content().is_some());

        let config = RequestConfiguration::with_query(crate::request::QueryParameters {
            select: vec!["value".to_string()],
            ..Default::default()
        });
        let reveal = item.to_get_oma_setting_plain_text_value_request("sec-2", Some(&config));
        assert_eq!(reveal.path_parameters()["secretReferenceValueId"], "sec-2");
        assert_eq!(reveal.query().len(), 1);
        assert!(adapter.seen().is_empty());
    }
}
