//! Hand-off to the platform service clients
//!
//! Commands that talk to a platform service do not implement the service call here.
//! Their actions translate the command line into a [`ServiceRequest`] and pass it to the
//! injected [`ServiceClient`].

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::{
    descriptor::{Action, Invocation},
    spec::{file_spec_from_invocation, FileSpec},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Service {
    Artifactory,
    Distribution,
    Pipelines,
    MissionControl,
    Xray,
    Access,
    Platform,
}

/// A command line resolved into what the service client needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRequest {
    pub service: Service,
    pub command: String,
    pub arguments: Vec<String>,
    /// Flags given on the command line, by name
    pub flags: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<FileSpec>,
}

impl ServiceRequest {
    pub fn from_invocation(service: Service, inv: &Invocation<'_>) -> Self {
        ServiceRequest {
            service,
            command: inv.command_line(),
            arguments: inv.args.clone(),
            flags: inv
                .explicit_flags()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            spec: None,
        }
    }
}

pub trait ServiceClient: Send + Sync {
    fn execute(&self, request: &ServiceRequest) -> anyhow::Result<()>;
}

/// Writes each request as pretty JSON instead of calling the service
pub struct RequestPrinter<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> RequestPrinter<W> {
    pub fn new(out: W) -> Self {
        RequestPrinter {
            out: Mutex::new(out),
        }
    }
}

impl<W: Write + Send> ServiceClient for RequestPrinter<W> {
    fn execute(&self, request: &ServiceRequest) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(request)?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| anyhow::anyhow!("request output is poisoned"))?;
        writeln!(out, "{json}")?;
        Ok(())
    }
}

/// Action forwarding the invocation to `client`
pub fn forward(client: &Arc<dyn ServiceClient>, service: Service) -> Action {
    let client = Arc::clone(client);
    Action::new(move |inv| client.execute(&ServiceRequest::from_invocation(service, inv)))
}

/// Action forwarding a transfer command, with its file spec resolved from `--spec` or
/// the `<pattern> [target]` arguments
pub fn forward_with_spec(client: &Arc<dyn ServiceClient>, service: Service) -> Action {
    let client = Arc::clone(client);
    Action::new(move |inv| {
        let mut request = ServiceRequest::from_invocation(service, inv);
        request.spec = Some(file_spec_from_invocation(inv)?);
        client.execute(&request)
    })
}


#[cfg(test)]
mod tests {
    use super::testing::Recorder;
    use super::*;
    use crate::descriptor::FlagValue;
    use crate::registry::Registry;

    #[test]
    fn test_request_from_invocation_keeps_explicit_flags() {
        let registry = Registry::default();
        let root = clap::Command::new("jf");
        let mut inv = Invocation::new(vec!["pl".into(), "trigger".into()], &registry, &root)
            .with_args(vec!["my-pipe".into(), "main".into()]);
        inv.set_flag("monitor", FlagValue::Bool(true), true);
        inv.set_flag("server-id", FlagValue::String("default".into()), false);

        let request = ServiceRequest::from_invocation(Service::Pipelines, &inv);
        assert_eq!(request.command, "pl trigger");
        assert_eq!(request.arguments, vec!["my-pipe", "main"]);
        assert_eq!(request.flags.len(), 1);
        assert_eq!(request.flags["monitor"], "true");
    }

    #[test]
    fn test_forward_with_spec_attaches_spec() {
        let recorder = Arc::new(Recorder::default());
        let client: Arc<dyn ServiceClient> = recorder.clone();
        let action = forward_with_spec(&client, Service::Artifactory);

        let registry = Registry::default();
        let root = clap::Command::new("jf");
        let inv = Invocation::new(vec!["rt".into(), "upload".into()], &registry, &root)
            .with_args(vec!["*.zip".into(), "generic-local/".into()]);
        action.call(&inv).unwrap();

        let requests = recorder.requests.lock().unwrap();
        let spec = requests[0].spec.as_ref().unwrap();
        assert_eq!(spec.files[0].pattern, "*.zip");
    }

    #[test]
    fn test_request_printer_writes_json() {
        let printer = RequestPrinter::new(Vec::new());
        let request = ServiceRequest {
            service: Service::Artifactory,
            command: "rt ping".into(),
            arguments: vec![],
            flags: BTreeMap::new(),
            spec: None,
        };
        printer.execute(&request).unwrap();

        let out = printer.out.into_inner().unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"service\": \"artifactory\""));
        assert!(text.contains("\"command\": \"rt ping\""));
        assert!(!text.contains("spec"));
    }
}
