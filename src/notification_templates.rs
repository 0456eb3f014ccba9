//! Notification message templates used by compliance actions.
//!
//! Entity set: `deviceManagement/notificationMessageTemplates/{notificationMessageTemplate-id}`,
//! with the per-locale texts nested under `localizedNotificationMessages`.

use serde::{Deserialize, Serialize};

use crate::builder::{CollectionRequestBuilder, ItemRequestBuilder};
use crate::error::Result;
use crate::request::{RequestConfiguration, RequestInformation};

pub(crate) const TEMPLATE: &str = "deviceManagement/notificationMessageTemplates";
pub(crate) const ITEM_PARAMETER: &str = "notificationMessageTemplate-id";

/// `deviceManagement/notificationMessageTemplates`.
pub type NotificationMessageTemplatesRequestBuilder<'a> =
    CollectionRequestBuilder<'a, NotificationMessageTemplate>;
/// `deviceManagement/notificationMessageTemplates/{id}`.
pub type NotificationMessageTemplateItemRequestBuilder<'a> =
    ItemRequestBuilder<'a, NotificationMessageTemplate>;

/// Which branding elements the message includes. Graph sends this as a
/// comma-separated flags string, e.g. `"includeCompanyLogo,includeCompanyName"`.
pub type NotificationTemplateBrandingOptions = String;

/// Email sent to users by a compliance policy action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessageTemplate {
    /// Template ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Admin-facing name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Locale used when the recipient has none of the localized ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,

    /// Branding elements included in the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branding_options: Option<NotificationTemplateBrandingOptions>,

    /// RFC 3339 timestamp of the last change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date_time: Option<String>,
}

/// The text of a template in one locale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedNotificationMessage {
    /// Message ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// BCP 47 tag such as `en-us`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Email subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Email body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_template: Option<String>,

    /// Whether this is the default-locale message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,

    /// RFC 3339 timestamp of the last change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date_time: Option<String>,
}

impl<'a> ItemRequestBuilder<'a, NotificationMessageTemplate> {
    /// Builds the `sendTestMessage` POST without sending it.
    pub fn to_send_test_message_request(
        &self,
        config: Option<&RequestConfiguration>,
    ) -> RequestInformation {
        self.to_action_request("sendTestMessage", config)
    }

    /// Sends the template's default-locale message to the signed-in user.
    /// Requires a delegated token; app-only callers get a 403.
    pub async fn send_test_message(&self, config: Option<&RequestConfiguration>) -> Result<()> {
        self.execute_no_content(&self.to_send_test_message_request(config)).await
    }

    /// The per-locale texts of this template.
    pub fn localized_notification_messages(
        &self,
    ) -> CollectionRequestBuilder<'a, LocalizedNotificationMessage> {
        self.collection(
            "localizedNotificationMessages",
            "localizedNotificationMessage-id",
        )
    }
}
