//! Generic request builders for OData entity sets and their items.
//!
//! Every Graph entity set follows the same shape:
//!
//! | Builder | Template | Operations |
//! |---|---|---|
//! | [`CollectionRequestBuilder`] | `.../things` | list, list_all, pages, create, count |
//! | [`ItemRequestBuilder`] | `.../things/{thing-id}` | get, update, delete |
//!
//! Resource modules give these builders concrete entity types and add
//! their OData actions and functions through inherent impls, e.g.
//! `impl ItemRequestBuilder<'_, ManagedDevice> { pub async fn retire(..) }`.
//!
//! Every operation has a `to_*_request` twin that returns the
//! [`RequestInformation`] without sending it.

use std::marker::PhantomData;

use reqwest::Method;
use reqwest::header::{ACCEPT, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::adapter::{
    RequestAdapter, send_json, send_no_content, send_optional, send_text,
};
use crate::error::Result;
use crate::odata::{ODataCollection, PageIterator};
use crate::request::{PathParameters, RequestConfiguration, RequestInformation};

/// Builder for an entity set such as `deviceManagement/managedDevices`.
pub struct CollectionRequestBuilder<'a, T> {
    adapter: &'a dyn RequestAdapter,
    url_template: String,
    item_parameter: &'static str,
    path_parameters: PathParameters,
    raw_url: Option<String>,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T> CollectionRequestBuilder<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    /// `item_parameter` names the path parameter that [`by_id`](Self::by_id)
    /// fills, e.g. `managedDevice-id`.
    pub(crate) fn new(
        adapter: &'a dyn RequestAdapter,
        url_template: impl Into<String>,
        item_parameter: &'static str,
        path_parameters: PathParameters,
    ) -> Self {
        CollectionRequestBuilder {
            adapter,
            url_template: url_template.into(),
            item_parameter,
            path_parameters,
            raw_url: None,
            _entity: PhantomData,
        }
    }

    /// The collection's URL template, with `{name}` placeholders.
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Same collection, but list requests go to `raw_url` as-is (a saved
    /// `@odata.nextLink`, or a URL with hand-built query options).
    pub fn with_url(&self, raw_url: &str) -> Self {
        CollectionRequestBuilder {
            adapter: self.adapter,
            url_template: self.url_template.clone(),
            item_parameter: self.item_parameter,
            path_parameters: self.path_parameters.clone(),
            raw_url: Some(raw_url.to_string()),
            _entity: PhantomData,
        }
    }

    /// Builder for a single item of this set.
    pub fn by_id(&self, id: &str) -> ItemRequestBuilder<'a, T> {
        let mut path_parameters = self.path_parameters.clone();
        path_parameters.insert(self.item_parameter.to_string(), id.to_string());
        ItemRequestBuilder::new(
            self.adapter,
            format!("{}/{{{}}}", self.url_template, self.item_parameter),
            path_parameters,
        )
    }

    /// Builds the GET for one page without sending it.
    pub fn to_list_request(&self, config: Option<&RequestConfiguration>) -> RequestInformation {
        let mut info = match &self.raw_url {
            Some(url) => RequestInformation::from_raw_url(Method::GET, url),
            None => RequestInformation::new(
                Method::GET,
                self.url_template.clone(),
                self.path_parameters.clone(),
            ),
        };
        info.configure(config);
        info
    }

    /// Fetches one page of the collection.
    pub async fn list(&self, config: Option<&RequestConfiguration>) -> Result<ODataCollection<T>> {
        send_json(self.adapter, &self.to_list_request(config)).await
    }

    /// Fetches the page at an absolute `@odata.nextLink`.
    pub async fn list_next(&self, next_link: &str) -> Result<ODataCollection<T>> {
        let info = RequestInformation::from_raw_url(Method::GET, next_link);
        send_json(self.adapter, &info).await
    }

    /// Iterates the collection page by page.
    pub fn pages(&self, config: Option<&RequestConfiguration>) -> PageIterator<'a, T> {
        PageIterator::new(self.adapter, self.to_list_request(config))
    }

    /// Follows `@odata.nextLink` until every item has been fetched.
    pub async fn list_all(&self, config: Option<&RequestConfiguration>) -> Result<Vec<T>> {
        self.pages(config).collect_all().await
    }

    /// Builds the POST that creates `body` without sending it.
    pub fn to_create_request(
        &self,
        body: &T,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        let mut info = RequestInformation::new(
            Method::POST,
            self.url_template.clone(),
            self.path_parameters.clone(),
        );
        info.set_json_body(body)?;
        info.configure(config);
        Ok(info)
    }

    /// Creates a new item; returns the entity as stored by the service.
    pub async fn create(&self, body: &T, config: Option<&RequestConfiguration>) -> Result<T> {
        send_json(self.adapter, &self.to_create_request(body, config)?).await
    }

    /// The `$count` segment needs `ConsistencyLevel: eventual` and answers
    /// in `text/plain`.
    pub fn to_count_request(&self, config: Option<&RequestConfiguration>) -> RequestInformation {
        let mut info = RequestInformation::new(
            Method::GET,
            format!("{}/$count", self.url_template),
            self.path_parameters.clone(),
        );
        info.set_header(
            HeaderName::from_static("consistencylevel"),
            HeaderValue::from_static("eventual"),
        );
        info.set_header(ACCEPT, HeaderValue::from_static("text/plain"));
        info.configure(config);
        info
    }

    /// Returns the number of items matching the configured `$filter`/`$search`.
    pub async fn count(&self, config: Option<&RequestConfiguration>) -> Result<i64> {
        let text = send_text(self.adapter, &self.to_count_request(config)).await?;
        Ok(serde_json::from_str(text.trim())?)
    }
}

/// Builder for one item of an entity set, e.g.
/// `deviceManagement/managedDevices/{managedDevice-id}`.
pub struct ItemRequestBuilder<'a, T> {
    adapter: &'a dyn RequestAdapter,
    url_template: String,
    path_parameters: PathParameters,
    raw_url: Option<String>,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T> ItemRequestBuilder<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    pub(crate) fn new(
        adapter: &'a dyn RequestAdapter,
        url_template: impl Into<String>,
        path_parameters: PathParameters,
    ) -> Self {
        ItemRequestBuilder {
            adapter,
            url_template: url_template.into(),
            path_parameters,
            raw_url: None,
            _entity: PhantomData,
        }
    }

    /// The item's URL template, with `{name}` placeholders.
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Values for the template placeholders, parents included.
    pub fn path_parameters(&self) -> &PathParameters {
        &self.path_parameters
    }

    /// Same item, but get, update and delete go to `raw_url` as-is.
    /// Actions, functions and nested collections keep using the template.
    pub fn with_url(&self, raw_url: &str) -> Self {
        ItemRequestBuilder {
            adapter: self.adapter,
            url_template: self.url_template.clone(),
            path_parameters: self.path_parameters.clone(),
            raw_url: Some(raw_url.to_string()),
            _entity: PhantomData,
        }
    }

    fn item_request(&self, method: Method, config: Option<&RequestConfiguration>) -> RequestInformation {
        let mut info = match &self.raw_url {
            Some(url) => RequestInformation::from_raw_url(method, url),
            None => self.request(method, ""),
        };
        info.configure(config);
        info
    }

    /// Builds the GET for this item without sending it.
    pub fn to_get_request(&self, config: Option<&RequestConfiguration>) -> RequestInformation {
        self.item_request(Method::GET, config)
    }

    /// Reads the item.
    pub async fn get(&self, config: Option<&RequestConfiguration>) -> Result<T> {
        send_json(self.adapter, &self.to_get_request(config)).await
    }

    /// Builds the PATCH for this item without sending it.
    pub fn to_update_request(
        &self,
        body: &T,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        let mut info = self.item_request(Method::PATCH, config);
        info.set_json_body(body)?;
        Ok(info)
    }

    /// PATCHes the item. Only fields set on `body` are sent. Returns the
    /// updated entity when the service echoes it, `None` on `204`.
    pub async fn update(&self, body: &T, config: Option<&RequestConfiguration>) -> Result<Option<T>> {
        send_optional(self.adapter, &self.to_update_request(body, config)?).await
    }

    /// Builds the DELETE for this item without sending it.
    pub fn to_delete_request(&self, config: Option<&RequestConfiguration>) -> RequestInformation {
        self.item_request(Method::DELETE, config)
    }

    /// Deletes the item.
    pub async fn delete(&self, config: Option<&RequestConfiguration>) -> Result<()> {
        send_no_content(self.adapter, &self.to_delete_request(config)).await
    }

    /// Request on this item's template with `suffix` appended as further
    /// path segments (an action, function or navigation property).
    pub(crate) fn request(&self, method: Method, suffix: &str) -> RequestInformation {
        let template = if suffix.is_empty() {
            self.url_template.clone()
        } else {
            format!("{}/{suffix}", self.url_template)
        };
        RequestInformation::new(method, template, self.path_parameters.clone())
    }

    /// Builds the POST for a bound OData action that takes no body.
    pub(crate) fn to_action_request(
        &self,
        action: &str,
        config: Option<&RequestConfiguration>,
    ) -> RequestInformation {
        let mut info = self.request(Method::POST, action);
        info.configure(config);
        info
    }

    /// Builds the POST for a bound OData action with a JSON body.
    pub(crate) fn to_action_request_with_body<B: Serialize + ?Sized>(
        &self,
        action: &str,
        body: &B,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        let mut info = self.to_action_request(action, config);
        info.set_json_body(body)?;
        Ok(info)
    }

    /// Builds the GET for a bound OData function. `{name}` placeholders in
    /// `function` are filled from `parameters`.
    pub(crate) fn to_function_request(
        &self,
        function: &str,
        parameters: &[(&str, &str)],
        config: Option<&RequestConfiguration>,
    ) -> RequestInformation {
        let mut info = self.request(Method::GET, function);
        for (name, value) in parameters {
            info.path_parameters_mut()
                .insert((*name).to_string(), (*value).to_string());
        }
        info.configure(config);
        info
    }

    /// Sends a request that answers `204 No Content`.
    pub(crate) async fn execute_no_content(&self, info: &RequestInformation) -> Result<()> {
        send_no_content(self.adapter, info).await
    }

    /// Sends a request that returns a JSON payload.
    pub(crate) async fn execute_json<R: DeserializeOwned>(&self, info: &RequestInformation) -> Result<R> {
        send_json(self.adapter, info).await
    }

    /// A nested entity set under this item.
    pub(crate) fn collection<U>(
        &self,
        segment: &str,
        item_parameter: &'static str,
    ) -> CollectionRequestBuilder<'a, U>
    where
        U: Serialize + DeserializeOwned,
    {
        CollectionRequestBuilder::new(
            self.adapter,
            format!("{}/{segment}", self.url_template),
            item_parameter,
            self.path_parameters.clone(),
        )
    }
}
