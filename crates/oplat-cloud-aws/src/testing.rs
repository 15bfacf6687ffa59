//! In-memory [`StackBackend`] modelling CloudFormation's create/update rules

use crate::backend::{StackBackend, StackDescription};
use crate::error::{AwsError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct StackRecord {
    template: String,
    description: StackDescription,
}

#[derive(Debug, Default)]
struct State {
    stacks: HashMap<String, StackRecord>,
    secrets: HashMap<String, String>,
    create_failure: Option<String>,
    create_calls: usize,
    update_calls: usize,
    delete_calls: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FakeStackBackend {
    state: Arc<Mutex<State>>,
}

impl FakeStackBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stack(self, name: &str, status: &str, outputs: &[(&str, &str)]) -> Self {
        self.state.lock().unwrap().stacks.insert(
            name.to_string(),
            StackRecord {
                template: String::new(),
                description: StackDescription {
                    status: status.to_string(),
                    outputs: outputs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                },
            },
        );
        self
    }

    pub fn with_secret(self, name: &str, payload: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .secrets
            .insert(name.to_string(), payload.to_string());
        self
    }

    pub fn failing_create(self, message: &str) -> Self {
        self.state.lock().unwrap().create_failure = Some(message.to_string());
        self
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    pub fn update_calls(&self) -> usize {
        self.state.lock().unwrap().update_calls
    }

    pub fn delete_calls(&self) -> usize {
        self.state.lock().unwrap().delete_calls
    }
}

#[async_trait]
impl StackBackend for FakeStackBackend {
    async fn create_stack(&self, stack_name: &str, template_body: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;

        if let Some(message) = &state.create_failure {
            return Err(AwsError::CloudFormation(message.clone()));
        }
        if state.stacks.contains_key(stack_name) {
            return Err(AwsError::AlreadyExists(stack_name.to_string()));
        }

        state.stacks.insert(
            stack_name.to_string(),
            StackRecord {
                template: template_body.to_string(),
                description: StackDescription {
                    status: "CREATE_COMPLETE".to_string(),
                    outputs: HashMap::new(),
                },
            },
        );
        Ok(())
    }

    async fn update_stack(&self, stack_name: &str, template_body: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.update_calls += 1;

        let record = state
            .stacks
            .get_mut(stack_name)
            .ok_or_else(|| AwsError::StackNotFound(stack_name.to_string()))?;
        if record.template == template_body {
            return Err(AwsError::NoChanges);
        }

        record.template = template_body.to_string();
        record.description.status = "UPDATE_COMPLETE".to_string();
        Ok(())
    }

    async fn delete_stack(&self, stack_name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.delete_calls += 1;
        state.stacks.remove(stack_name);
        Ok(())
    }

    async fn describe_stack(&self, stack_name: &str) -> Result<Option<StackDescription>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .stacks
            .get(stack_name)
            .map(|record| record.description.clone()))
    }

    async fn get_secret_value(&self, secret_id: &str) -> Result<String> {
        let state = self.state.lock().unwrap();
        state
            .secrets
            .get(secret_id)
            .cloned()
            .ok_or_else(|| AwsError::SecretNotFound(secret_id.to_string()))
    }
}
