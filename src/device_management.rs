//! The `deviceManagement` singleton and entry point to its entity sets.
//!
//! ```text
//! deviceManagement
//! ├── managedDevices/{managedDevice-id}
//! ├── deviceConfigurations/{deviceConfiguration-id}
//! ├── deviceCompliancePolicies/{deviceCompliancePolicy-id}
//! └── notificationMessageTemplates/{notificationMessageTemplate-id}
//! ```

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::adapter::{RequestAdapter, send_json, send_optional};
use crate::builder::CollectionRequestBuilder;
use crate::compliance_policies::{self, DeviceCompliancePoliciesRequestBuilder};
use crate::device_configurations::{self, DeviceConfigurationsRequestBuilder};
use crate::error::Result;
use crate::managed_devices::{self, ManagedDevicesRequestBuilder};
use crate::notification_templates::{self, NotificationMessageTemplatesRequestBuilder};
use crate::odata::PrimitiveValue;
use crate::request::{PathParameters, RequestConfiguration, RequestInformation};

const TEMPLATE: &str = "deviceManagement";

/// Tenant-wide Intune settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceManagement {
    /// Singleton ID, usually the tenant ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Intune licensing state of the tenant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_state: Option<DeviceManagementSubscriptionState>,

    /// Tenant-wide compliance settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<DeviceManagementSettings>,

    /// Company Portal branding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intune_brand: Option<IntuneBrand>,
}

/// Intune subscription state of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceManagementSubscriptionState {
    /// Provisioning has not finished.
    Pending,
    /// Licensed and working.
    Active,
    /// Active but needs attention.
    Warning,
    /// Turned off by an administrator.
    Disabled,
    /// The subscription was removed.
    Deleted,
    /// Blocked by Microsoft.
    Blocked,
    /// Locked after a billing problem.
    LockedOut,
    /// A state this crate does not know yet.
    #[serde(other)]
    UnknownFutureValue,
}

/// Tenant-wide compliance settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceManagementSettings {
    /// Days a device may go without checking in before it is marked
    /// noncompliant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_compliance_checkin_threshold_days: Option<i32>,

    /// Run the scheduled actions of compliance policies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_scheduled_action_enabled: Option<bool>,

    /// Devices with no compliance policy assigned are treated as noncompliant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_by_default: Option<bool>,
}

/// Company Portal branding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntuneBrand {
    /// Company name shown in the Company Portal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// IT contact name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_it_name: Option<String>,

    /// IT contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_it_phone_number: Option<String>,

    /// IT contact email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_it_email_address: Option<String>,

    /// Privacy statement URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_url: Option<String>,

    /// Show the company logo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_logo: Option<bool>,
}

/// Builder for `deviceManagement`. Obtain one from
/// [`GraphClient::device_management`](crate::client::GraphClient::device_management).
pub struct DeviceManagementRequestBuilder<'a> {
    adapter: &'a dyn RequestAdapter,
}

impl<'a> DeviceManagementRequestBuilder<'a> {
    /// Creates the root builder on top of `adapter`.
    pub fn new(adapter: &'a dyn RequestAdapter) -> Self {
        DeviceManagementRequestBuilder { adapter }
    }

    /// Builds the singleton GET without sending it.
    pub fn to_get_request(&self, config: Option<&RequestConfiguration>) -> RequestInformation {
        let mut info = RequestInformation::new(Method::GET, TEMPLATE, PathParameters::new());
        info.configure(config);
        info
    }

    /// Reads tenant-wide settings.
    pub async fn get(&self, config: Option<&RequestConfiguration>) -> Result<DeviceManagement> {
        send_json(self.adapter, &self.to_get_request(config)).await
    }

    /// Builds the singleton PATCH without sending it.
    pub fn to_update_request(
        &self,
        body: &DeviceManagement,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        let mut info = RequestInformation::new(Method::PATCH, TEMPLATE, PathParameters::new());
        info.set_json_body(body)?;
        info.configure(config);
        Ok(info)
    }

    /// PATCHes tenant settings; `None` when the service answers 204.
    pub async fn update(
        &self,
        body: &DeviceManagement,
        config: Option<&RequestConfiguration>,
    ) -> Result<Option<DeviceManagement>> {
        send_optional(self.adapter, &self.to_update_request(body, config)?).await
    }

    /// Builds the `verifyWindowsEnrollmentAutoDiscovery` GET without sending it.
    pub fn to_verify_windows_enrollment_auto_discovery_request(
        &self,
        domain_name: &str,
        config: Option<&RequestConfiguration>,
    ) -> RequestInformation {
        let mut params = PathParameters::new();
        params.insert("domainName".to_string(), domain_name.to_string());
        let mut info = RequestInformation::new(
            Method::GET,
            format!("{TEMPLATE}/verifyWindowsEnrollmentAutoDiscovery(domainName='{{domainName}}')"),
            params,
        );
        info.configure(config);
        info
    }

    /// Checks whether `enterpriseenrollment.{domain}` resolves for Windows
    /// auto-enrollment.
    pub async fn verify_windows_enrollment_auto_discovery(
        &self,
        domain_name: &str,
        config: Option<&RequestConfiguration>,
    ) -> Result<bool> {
        let info = self.to_verify_windows_enrollment_auto_discovery_request(domain_name, config);
        let result: PrimitiveValue<bool> = send_json(self.adapter, &info).await?;
        Ok(result.value)
    }

    /// `deviceManagement/managedDevices`.
    pub fn managed_devices(&self) -> ManagedDevicesRequestBuilder<'a> {
        CollectionRequestBuilder::new(
            self.adapter,
            managed_devices::TEMPLATE,
            managed_devices::ITEM_PARAMETER,
            PathParameters::new(),
        )
    }

    /// `deviceManagement/deviceConfigurations`.
    pub fn device_configurations(&self) -> DeviceConfigurationsRequestBuilder<'a> {
        CollectionRequestBuilder::new(
            self.adapter,
            device_configurations::TEMPLATE,
            device_configurations::ITEM_PARAMETER,
            PathParameters::new(),
        )
    }

    /// `deviceManagement/deviceCompliancePolicies`.
    pub fn device_compliance_policies(&self) -> DeviceCompliancePoliciesRequestBuilder<'a> {
        CollectionRequestBuilder::new(
            self.adapter,
            compliance_policies::TEMPLATE,
            compliance_policies::ITEM_PARAMETER,
            PathParameters::new(),
        )
    }

    /// `deviceManagement/notificationMessageTemplates`.
    pub fn notification_message_templates(&self) -> NotificationMessageTemplatesRequestBuilder<'a> {
        CollectionRequestBuilder::new(
            self.adapter,
            notification_templates::TEMPLATE,
            notification_templates::ITEM_PARAMETER,
            PathParameters::new(),
        )
    }
}
