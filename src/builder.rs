use std::path::Path;

use tracing::debug;

use crate::config::{Identity, TreeConfig};
use crate::error::{ColonizeError, LoadFailure};
use crate::file::{self, MARKER_FILE};
use crate::paths;
use crate::resolve;
use crate::schema::Schema;
use crate::types::LoadRequest;

/// Entry point for building a tree loader.
pub struct Colonize;

impl Colonize {
    pub fn loader() -> TreeLoader {
        TreeLoader::new()
    }
}

/// Builder for loading a project's configuration tree.
///
/// Defaults match a stock project: marker file `.colonize.yaml`, lenient
/// parsing (unknown keys in the marker are ignored).
#[derive(Debug, Clone)]
pub struct TreeLoader {
    marker_file: Option<String>,
    strict: bool,
}

impl Default for TreeLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeLoader {
    fn new() -> Self {
        Self {
            marker_file: None,
            strict: false,
        }
    }

    /// Override the marker file name (default: `.colonize.yaml`).
    pub fn marker_file(mut self, name: &str) -> Self {
        self.marker_file = Some(name.to_string());
        self
    }

    /// Enable or disable strict mode (default: `false`).
    /// In strict mode, unknown keys in the marker file produce errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn effective_marker_file(&self) -> &str {
        self.marker_file.as_deref().unwrap_or(MARKER_FILE)
    }

    /// Work out a [`LoadRequest`] for the template at `path`.
    ///
    /// Searches upward from `path` for the marker file. The root is the
    /// marker's directory, the template name is the final segment of `path`,
    /// and the template path is whatever lies between the two.
    pub fn request_for(&self, path: &Path, environment: &str) -> Result<LoadRequest, ColonizeError> {
        let origin = std::path::absolute(path)
            .map(|p| paths::normalize(&p))
            .map_err(|e| ColonizeError::IoError {
                path: path.to_path_buf(),
                source: e,
            })?;

        let marker_path = file::find_marker(&origin, self.effective_marker_file())?;
        let root_path = file::root_of(&marker_path);
        let template_path = paths::template_rel_path(&origin, &root_path)?;

        Ok(LoadRequest {
            environment: environment.to_string(),
            template_name: paths::basename(&origin),
            origin_path: origin,
            template_path,
            marker_path,
            root_path,
        })
    }

    /// Read the marker named by `request`, apply its overrides and derive the tree.
    ///
    /// A read failure returns only the identity. A parse (or strict-mode)
    /// failure also carries a fallback derived from the default schema.
    pub fn load(&self, request: &LoadRequest) -> Result<TreeConfig, LoadFailure> {
        let identity = Identity::from(request);

        let content = match file::read_marker(&request.marker_path) {
            Ok(content) => content,
            Err(error) => return Err(LoadFailure::new(error, identity)),
        };

        match resolve::resolve_schema(&content, &request.marker_path, self.strict) {
            Ok(schema) => {
                let config = TreeConfig::new(identity, schema);
                debug!(
                    environment = %config.environment(),
                    template = %config.template_path().display(),
                    depth = config.ancestors().len(),
                    "resolved configuration tree"
                );
                Ok(config)
            }
            Err(error) => {
                debug!(marker = %request.marker_path.display(), %error, "marker overrides not applied");
                match Schema::defaults() {
                    Ok(defaults) => Err(LoadFailure::with_fallback(
                        error,
                        TreeConfig::new(identity, defaults),
                    )),
                    Err(defaults_error) => {
                        debug!(%defaults_error, "no fallback: defaults failed to load");
                        Err(LoadFailure::new(error, identity))
                    }
                }
            }
        }
    }

    /// Discover the project around `path` and load it for `environment`.
    pub fn load_in_tree(&self, path: &Path, environment: &str) -> Result<TreeConfig, LoadFailure> {
        match self.request_for(path, environment) {
            Ok(request) => self.load(&request),
            Err(error) => {
                let identity = Identity {
                    environment: environment.to_string(),
                    origin_path: path.to_path_buf(),
                    ..Identity::default()
                };
                Err(LoadFailure::new(error, identity))
            }
        }
    }
}

/// Load the tree described by `request` with default loader settings.
pub fn load_config(request: &LoadRequest) -> Result<TreeConfig, LoadFailure> {
    TreeLoader::new().load(request)
}

/// Discover the project around `path` and load it for `environment`, with
/// default loader settings.
pub fn load_config_in_tree(path: &Path, environment: &str) -> Result<TreeConfig, LoadFailure> {
    TreeLoader::new().load_in_tree(path, environment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::Project;
    use std::path::PathBuf;

    fn request(project: &Project, template: &str, environment: &str) -> LoadRequest {
        LoadRequest {
            environment: environment.into(),
            origin_path: project.root().join(template),
            template_name: paths::basename(Path::new(template)),
            template_path: template.into(),
            marker_path: project.marker(),
            root_path: project.root().to_path_buf(),
        }
    }

    #[test]
    fn scenario_network_vpc_dev() {
        let project = Project::new().template("network/vpc");
        let root = project.root();

        let config = load_config_in_tree(&root.join("network/vpc"), "dev").unwrap();

        assert_eq!(
            config.ancestors(),
            &[root.to_path_buf(), root.join("network"), root.join("network/vpc")]
        );
        assert_eq!(
            config.value_files(),
            &[
                root.join("env/dev.tfvars"),
                root.join("network/env/dev.tfvars"),
                root.join("network/vpc/env/dev.tfvars"),
            ]
        );
        assert_eq!(config.combined().vals, root.join("network/vpc/_combined.tfvars"));
        assert_eq!(config.template_name(), "vpc");
        assert_eq!(config.template_path(), Path::new("network/vpc"));
        assert_eq!(config.root_path(), root);
        assert_eq!(config.marker_path(), project.marker());
        assert_eq!(config.environment(), "dev");
    }

    #[test]
    fn scenario_branch_and_leaf() {
        let project = Project::new().template("network/vpc").branch("network");
        let root = project.root();

        let network = load_config_in_tree(&root.join("network"), "dev").unwrap();
        let vpc = load_config_in_tree(&root.join("network/vpc"), "dev").unwrap();

        assert!(network.is_branch());
        assert!(!vpc.is_branch());
        assert!(vpc.is_leaf());
    }

    #[test]
    fn scenario_marker_absent() {
        let project = Project::without_marker().template("network/vpc");
        let path = project.root().join("network/vpc");

        let failure = Colonize::loader()
            .marker_file(".colonize-test-absent.yaml")
            .load_in_tree(&path, "dev")
            .unwrap_err();

        assert!(matches!(failure.error, ColonizeError::MarkerNotFound { .. }));
        assert!(failure.fallback.is_none());
        assert_eq!(failure.identity.environment, "dev");
    }

    #[test]
    fn parent_segment_in_path_targets_the_parent() {
        let project = Project::new().template("network/vpc");
        let root = project.root();

        let config = load_config_in_tree(&root.join("network/vpc/.."), "dev").unwrap();

        assert_eq!(config.ancestors(), &[root.to_path_buf(), root.join("network")]);
        assert_eq!(config.template_name(), "network");
        assert_eq!(config.template_path(), Path::new("network"));
        assert_eq!(config.origin_path(), root.join("network"));
        assert_eq!(config.combined().vals, root.join("network/_combined.tfvars"));
    }

    #[test]
    fn absolute_override_falls_back_to_defaults() {
        let project = Project::with_marker("environments_dir: /shared/env\n").template("network/vpc");
        let root = project.root();

        let failure = load_config_in_tree(&root.join("network/vpc"), "dev").unwrap_err();

        assert!(matches!(failure.error, ColonizeError::AbsoluteValue { .. }));
        let fallback = failure.fallback.expect("rejected overrides carry a fallback");
        assert_eq!(
            fallback.value_files(),
            &[
                root.join("env/dev.tfvars"),
                root.join("network/env/dev.tfvars"),
                root.join("network/vpc/env/dev.tfvars"),
            ]
        );
    }

    #[test]
    fn template_at_root_has_single_ancestor() {
        let project = Project::new();
        let config = load_config_in_tree(project.root(), "dev").unwrap();

        assert_eq!(config.ancestors(), &[project.root().to_path_buf()]);
        assert_eq!(config.template_path(), Path::new(""));
        assert_eq!(config.remote_file(), project.root().join("env/remote_setup.sh"));
    }

    #[test]
    fn overrides_flow_into_derived_paths() {
        let project = Project::with_marker(
            "environments_dir: environments\nvals_file_env_post_string: .auto.tfvars\n",
        )
        .template("app");
        let root = project.root();

        let config = load_config_in_tree(&root.join("app"), "prod").unwrap();

        assert_eq!(
            config.value_files(),
            &[
                root.join("environments/prod.auto.tfvars"),
                root.join("app/environments/prod.auto.tfvars"),
            ]
        );
        assert_eq!(config.schema().branch_order_file, "build_order.txt");
        assert_eq!(config.remote_file(), root.join("environments/remote_setup.sh"));
    }

    #[test]
    fn overridden_sentinel_drives_classification() {
        let project = Project::with_marker("branch_order_file: children.txt\n")
            .template("network")
            .branch("network");
        let path = project.root().join("network");

        let config = load_config_in_tree(&path, "dev").unwrap();
        assert!(config.is_leaf());

        std::fs::write(path.join("children.txt"), "vpc\n").unwrap();
        assert!(config.is_branch());
    }

    #[test]
    fn load_explicit_request() {
        let project = Project::new().template("a/b");
        let config = load_config(&request(&project, "a/b", "qa")).unwrap();

        assert_eq!(config.ancestors().len(), 3);
        assert_eq!(config.template_name(), "b");
        assert_eq!(
            config.derived_files()[2],
            project.root().join("a/b/env/derived.tfvars")
        );
    }

    #[test]
    fn origin_anchors_combined_outputs() {
        let project = Project::new().template("a/b");
        let mut req = request(&project, "a/b", "qa");
        req.origin_path = project.root().join("elsewhere");

        let config = load_config(&req).unwrap();
        assert_eq!(
            config.combined().tf,
            project.root().join("elsewhere/_combined.tf")
        );
        assert_eq!(config.ancestors()[2], project.root().join("a/b"));
    }

    #[test]
    fn unreadable_marker_returns_identity_only() {
        let project = Project::new().template("a");
        let mut req = request(&project, "a", "dev");
        req.marker_path = project.root().join("missing.yaml");

        let failure = load_config(&req).unwrap_err();
        assert!(matches!(failure.error, ColonizeError::IoError { .. }));
        assert!(failure.fallback.is_none());
        assert_eq!(failure.identity.template_path, PathBuf::from("a"));
        assert_eq!(failure.identity.marker_path, project.root().join("missing.yaml"));
    }

    #[test]
    fn malformed_marker_returns_defaulted_fallback() {
        let project = Project::with_marker("environments_dir: [broken\n").template("a");

        let failure = load_config_in_tree(&project.root().join("a"), "dev").unwrap_err();

        assert!(matches!(failure.error, ColonizeError::ParseError { .. }));
        let fallback = failure.fallback.expect("parse failures carry a fallback");
        assert_eq!(fallback.schema(), &Schema::defaults().unwrap());
        assert_eq!(
            fallback.value_files()[1],
            project.root().join("a/env/dev.tfvars")
        );
    }

    #[test]
    fn strict_mode_rejects_unknown_keys_with_fallback() {
        let project = Project::with_marker("enviroments_dir: typo\n").template("a");
        let path = project.root().join("a");

        let lenient = Colonize::loader().load_in_tree(&path, "dev");
        assert!(lenient.is_ok());

        let failure = Colonize::loader()
            .strict(true)
            .load_in_tree(&path, "dev")
            .unwrap_err();
        assert!(matches!(failure.error, ColonizeError::UnknownKeys(_)));
        assert!(failure.fallback.is_some());
    }

    #[test]
    fn custom_marker_name() {
        let project = Project::without_marker()
            .file("colonize.yml", "derived_file: computed.tfvars\n")
            .template("svc");

        let config = Colonize::loader()
            .marker_file("colonize.yml")
            .load_in_tree(&project.root().join("svc"), "dev")
            .unwrap();

        assert_eq!(config.marker_path(), project.root().join("colonize.yml"));
        assert_eq!(
            config.derived_files()[1],
            project.root().join("svc/env/computed.tfvars")
        );
    }

    #[test]
    fn failure_converts_into_error() {
        fn run(path: &Path) -> Result<TreeConfig, ColonizeError> {
            Ok(Colonize::loader()
                .marker_file(".colonize-test-absent.yaml")
                .load_in_tree(path, "dev")?)
        }

        let project = Project::without_marker();
        assert!(matches!(
            run(project.root()),
            Err(ColonizeError::MarkerNotFound { .. })
        ));
    }
}
