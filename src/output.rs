//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{App, Organization, Route, Space};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for App {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.guid.len().max(36));

        let mut lines = vec![
            format!("App: {}", self.name),
            divider,
            format!("Guid:           {}", self.guid),
            format!("State:          {}", self.state),
            format!("Instances:      {}", self.instances),
            format!("Memory:         {} MB", self.memory),
            format!("Disk quota:     {} MB", self.disk_quota),
        ];

        if let Some(space) = self.embedded_space() {
            lines.push(format!("Space:          {} ({})", space.name, space.guid));
        } else if !self.space_guid.is_empty() {
            lines.push(format!("Space guid:     {}", self.space_guid));
        }

        if let Some(ref buildpack) = self.buildpack {
            lines.push(format!("Buildpack:      {buildpack}"));
        }

        if let Some(ref image) = self.docker_image {
            lines.push(format!("Docker image:   {image}"));
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!(
                "Created:        {}",
                created.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Route {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.guid.len().max(36));

        let host = if self.host.is_empty() {
            "(no host)"
        } else {
            self.host.as_str()
        };

        let mut lines = vec![
            format!("Route: {host}"),
            divider,
            format!("Guid:           {}", self.guid),
            format!("Domain guid:    {}", self.domain_guid),
            format!("Space guid:     {}", self.space_guid),
        ];

        if !self.path.is_empty() {
            lines.push(format!("Path:           {}", self.path));
        }

        if let Some(port) = self.port {
            lines.push(format!("Port:           {port}"));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Space {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.guid.len().max(36));

        let mut lines = vec![
            format!("Space: {}", self.name),
            divider,
            format!("Guid:           {}", self.guid),
        ];

        if let Some(org) = self.embedded_organization() {
            lines.push(format!("Organization:   {} ({})", org.name, org.guid));
        } else if !self.organization_guid.is_empty() {
            lines.push(format!("Org guid:       {}", self.organization_guid));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Organization {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.guid.len().max(36));

        vec![
            format!("Organization: {}", self.name),
            divider,
            format!("Guid:           {}", self.guid),
        ]
        .join("\n")
    }
}
