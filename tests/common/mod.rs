//! Common test utilities
//!
//! In-memory transports that record every call they receive, along with the
//! `CallContext` each call was handed. The fakes do not enforce deadlines
//! themselves; that is left to the code under test and the AWS adapters.

#![allow(dead_code)]

use async_trait::async_trait;
use aws_resource_reconciler::context::CallContext;
use aws_resource_reconciler::error::TransportError;
use aws_resource_reconciler::provider::{
    GetSecretValueRequest, SecretValueOutput, SecretValueTransport, TaggingTransport,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A call observed by [`FakeTagging`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagCall {
    List(String),
    Untag(String, Vec<String>),
    Tag(String, HashMap<String, String>),
}

/// Tagging transport backed by a map, with injectable failures
#[derive(Debug, Clone, Default)]
pub struct FakeTagging {
    pub calls: Arc<Mutex<Vec<TagCall>>>,
    pub contexts: Arc<Mutex<Vec<CallContext>>>,
    pub remote: Arc<Mutex<HashMap<String, String>>>,
    pub fail_list: Option<TransportError>,
    pub fail_untag: Option<TransportError>,
    pub fail_tag: Option<TransportError>,
}

impl FakeTagging {
    pub fn with_remote(tags: &[(&str, &str)]) -> Self {
        let fake = Self::default();
        *fake.remote.lock().unwrap() = map(tags);
        fake
    }

    pub fn calls(&self) -> Vec<TagCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn contexts(&self) -> Vec<CallContext> {
        self.contexts.lock().unwrap().clone()
    }

    pub fn remote(&self) -> HashMap<String, String> {
        self.remote.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaggingTransport for FakeTagging {
    async fn list_tags_for_resource(
        &self,
        ctx: &CallContext,
        identifier: &str,
    ) -> Result<HashMap<String, String>, TransportError> {
        self.contexts.lock().unwrap().push(*ctx);
        self.calls
            .lock()
            .unwrap()
            .push(TagCall::List(identifier.to_string()));
        match &self.fail_list {
            Some(e) => Err(e.clone()),
            None => Ok(self.remote()),
        }
    }

    async fn untag_resource(
        &self,
        ctx: &CallContext,
        identifier: &str,
        keys: &[String],
    ) -> Result<(), TransportError> {
        self.contexts.lock().unwrap().push(*ctx);
        self.calls
            .lock()
            .unwrap()
            .push(TagCall::Untag(identifier.to_string(), keys.to_vec()));
        if let Some(e) = &self.fail_untag {
            return Err(e.clone());
        }
        let mut remote = self.remote.lock().unwrap();
        for key in keys {
            remote.remove(key);
        }
        Ok(())
    }

    async fn tag_resource(
        &self,
        ctx: &CallContext,
        identifier: &str,
        tags: &HashMap<String, String>,
    ) -> Result<(), TransportError> {
        self.contexts.lock().unwrap().push(*ctx);
        self.calls
            .lock()
            .unwrap()
            .push(TagCall::Tag(identifier.to_string(), tags.clone()));
        if let Some(e) = &self.fail_tag {
            return Err(e.clone());
        }
        self.remote
            .lock()
            .unwrap()
            .extend(tags.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }
}

/// Canned GetSecretValue response
#[derive(Debug, Clone, Default)]
pub struct CannedSecret {
    pub arn: Option<String>,
    pub created_secs: Option<i64>,
    pub secret_binary: Option<Vec<u8>>,
    pub secret_string: Option<String>,
}

/// Secret transport that returns one canned response or one error
#[derive(Debug, Clone, Default)]
pub struct FakeSecrets {
    pub requests: Arc<Mutex<Vec<GetSecretValueRequest>>>,
    pub contexts: Arc<Mutex<Vec<CallContext>>>,
    pub response: CannedSecret,
    pub fail: Option<TransportError>,
}

impl FakeSecrets {
    pub fn returning(response: CannedSecret) -> Self {
        Self {
            response,
            ..Self::default()
        }
    }

    pub fn failing(error: TransportError) -> Self {
        Self {
            fail: Some(error),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<GetSecretValueRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn contexts(&self) -> Vec<CallContext> {
        self.contexts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SecretValueTransport for FakeSecrets {
    async fn get_secret_value(
        &self,
        ctx: &CallContext,
        request: &GetSecretValueRequest,
    ) -> Result<SecretValueOutput, TransportError> {
        self.contexts.lock().unwrap().push(*ctx);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(e) = &self.fail {
            return Err(e.clone());
        }
        Ok(SecretValueOutput {
            arn: self.response.arn.clone(),
            created_date: self
                .response
                .created_secs
                .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0)),
            secret_binary: self.response.secret_binary.clone(),
            secret_string: self.response.secret_string.clone(),
        })
    }
}

pub fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
