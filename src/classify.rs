//! Service-type rules for matching processes to frontend dev tooling.

use std::fmt;

use crate::manifest::Manifest;

/// Frontend tooling a listening process can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Webpack,
    Vite,
    NextJs,
    NuxtJs,
    VueCli,
    AngularCli,
    CreateReactApp,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ServiceType::Webpack => "Webpack",
            ServiceType::Vite => "Vite",
            ServiceType::NextJs => "Next.js",
            ServiceType::NuxtJs => "Nuxt.js",
            ServiceType::VueCli => "Vue CLI",
            ServiceType::AngularCli => "Angular CLI",
            ServiceType::CreateReactApp => "Create React App",
        };
        f.write_str(label)
    }
}

/// Dependency keys checked against the manifest, in priority order.
const MANIFEST_RULES: &[(&str, ServiceType)] = &[
    ("webpack", ServiceType::Webpack),
    ("webpack-dev-server", ServiceType::Webpack),
    ("webpack-cli", ServiceType::Webpack),
    ("vite", ServiceType::Vite),
    ("next", ServiceType::NextJs),
    ("nuxt", ServiceType::NuxtJs),
    ("vue-cli-service", ServiceType::VueCli),
    ("@angular/cli", ServiceType::AngularCli),
    ("react-scripts", ServiceType::CreateReactApp),
];

/// True when the command line could plausibly host a dev server at all.
///
/// Processes without a webpack, vite, or node marker are dropped before any
/// manifest work happens.
pub fn is_candidate(command: &str) -> bool {
    command.contains("webpack") || command.contains("vite") || command.contains("node")
}

/// Assigns a service type; first rule wins, no fallthrough.
///
/// Command-line markers beat manifest dependencies so that `webpack serve`
/// running inside a workspace that also declares vite still reports as
/// Webpack.
pub fn classify(command: &str, manifest: Option<&Manifest>) -> Option<ServiceType> {
    if command.contains("webpack") {
        return Some(ServiceType::Webpack);
    }
    if command.contains("vite") {
        return Some(ServiceType::Vite);
    }
    let manifest = manifest?;
    MANIFEST_RULES
        .iter()
        .find(|(key, _)| manifest.depends_on(key))
        .map(|(_, service)| *service)
}
