//! Flat records used as typed views over SlipStream resources.
//!
//! Field names are the snake_case attribute names produced by
//! [`CimiResource`](crate::cimi::CimiResource), so any wrapped resource can be
//! decoded with [`CimiResource::to_record`](crate::cimi::CimiResource::to_record).

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct App {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: Option<i64>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Deployment {
    pub id: String,
    pub module: String,
    pub status: String,
    pub started_at: Option<String>,
    pub last_state_change: Option<String>,
    #[serde(default)]
    pub clouds: Vec<String>,
    pub username: String,
    pub abort: Option<String>,
    pub service_url: Option<String>,
    #[serde(default)]
    pub scalable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Node {
    pub path: String,
    pub name: String,
    pub cloud: String,
    pub multiplicity: u32,
    pub max_provisioning_failures: u32,
    pub network: Option<String>,
    pub cpu: Option<u32>,
    pub ram: Option<u64>,
    pub disk: Option<u64>,
    pub extra_disk_volatile: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct VirtualMachine {
    pub id: String,
    pub cloud: String,
    pub status: String,
    pub deployment_id: Option<String>,
    pub deployment_owner: Option<String>,
    pub node_name: Option<String>,
    pub node_instance_id: Option<String>,
    pub ip: Option<String>,
    pub cpu: Option<u32>,
    pub ram: Option<u64>,
    pub disk: Option<u64>,
    pub instance_type: Option<String>,
    #[serde(default)]
    pub is_usable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Usage {
    pub cloud: String,
    pub run_usage: u64,
    pub vm_usage: u64,
    pub inactive_vm_usage: u64,
    pub others_vm_usage: u64,
    pub pending_vm_usage: u64,
    pub unknown_vm_usage: u64,
    pub quota: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Module {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created: Option<String>,
    pub modified: Option<String>,
    pub description: Option<String>,
    pub version: Option<i64>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct User {
    pub username: String,
    pub cyclone_login: Option<String>,
    pub github_login: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub organization: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub configured_clouds: Vec<String>,
    pub default_cloud: Option<String>,
    #[serde(default)]
    pub ssh_public_keys: Vec<String>,
    pub keep_running: Option<String>,
    pub timeout: Option<u32>,
    #[serde(default)]
    pub privileged: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::cimi::CimiResource;

    #[test]
    fn app_type_is_renamed() {
        let app: App = serde_json::from_value(json!({
            "name": "wordpress",
            "type": "application",
            "version": 3,
            "path": "apps/WordPress/wordpress",
        }))
        .unwrap();
        assert_eq!(app.kind, "application");
        assert_eq!(
            serde_json::to_value(&app).unwrap()["type"],
            json!("application")
        );
    }

    #[test]
    fn module_from_camel_case_resource() {
        let resource = CimiResource::try_from(json!({
            "name": "ubuntu-16.04",
            "type": "image",
            "created": "2017-01-01T00:00:00Z",
            "modified": null,
            "description": "Minimal Ubuntu",
            "version": 1244,
            "path": "examples/images/ubuntu-16.04",
            "resourceURI": "http://sixsq.com/slipstream/1/Module",
        }))
        .unwrap();
        let module: Module = resource.to_record().unwrap();
        assert_eq!(
            module,
            Module {
                name: "ubuntu-16.04".into(),
                kind: "image".into(),
                created: Some("2017-01-01T00:00:00Z".into()),
                modified: None,
                description: Some("Minimal Ubuntu".into()),
                version: Some(1244),
                path: "examples/images/ubuntu-16.04".into(),
            }
        );
    }

    #[test]
    fn virtual_machine_from_camel_case_resource() {
        let resource = CimiResource::try_from(json!({
            "id": "vm-1",
            "cloud": "exoscale-ch-gva",
            "status": "running",
            "deploymentId": "d-1",
            "deploymentOwner": "alice",
            "nodeName": "web",
            "nodeInstanceId": "web.1",
            "ip": "10.0.0.1",
            "cpu": 2,
            "ram": 4096,
            "disk": 10,
            "instanceType": "Medium",
            "isUsable": true,
        }))
        .unwrap();
        let vm: VirtualMachine = resource.to_record().unwrap();
        assert_eq!(vm.deployment_id.as_deref(), Some("d-1"));
        assert_eq!(vm.node_instance_id.as_deref(), Some("web.1"));
        assert_eq!(vm.instance_type.as_deref(), Some("Medium"));
        assert!(vm.is_usable);
    }

    #[test]
    fn user_defaults_missing_lists() {
        let user: User = serde_json::from_value(json!({
            "username": "alice",
            "email": "alice@example.com",
            "defaultCloud": "ignored-camel-case",
        }))
        .unwrap();
        assert!(user.roles.is_empty());
        assert!(user.ssh_public_keys.is_empty());
        assert!(!user.privileged);
        assert_eq!(user.default_cloud, None);
    }

    #[test]
    fn usage_requires_counters() {
        let result: Result<Usage, _> = serde_json::from_value(json!({"cloud": "c"}));
        assert!(result.is_err());
    }

    #[test]
    fn deployment_and_node_roundtrip_fields() {
        let deployment: Deployment = serde_json::from_value(json!({
            "id": "d-1",
            "module": "apps/web",
            "status": "ready",
            "started_at": "2017-01-01",
            "last_state_change": null,
            "clouds": ["c1", "c2"],
            "username": "alice",
            "abort": null,
            "service_url": "http://10.0.0.1",
            "scalable": true,
        }))
        .unwrap();
        assert_eq!(deployment.clouds, vec!["c1", "c2"]);

        let node: Node = serde_json::from_value(json!({
            "path": "apps/web/web",
            "name": "web",
            "cloud": "c1",
            "multiplicity": 2,
            "max_provisioning_failures": 0,
            "network": "Public",
            "cpu": 1,
            "ram": 1024,
            "disk": null,
            "extra_disk_volatile": null,
        }))
        .unwrap();
        assert_eq!(node.multiplicity, 2);
        assert_eq!(node.disk, None);
    }
}
