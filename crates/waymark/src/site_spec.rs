//! Mapping from loaded configuration to the navigation build spec.

use waymark_config::{BrokenLinks, Config, FooterSection, LinkRef, NavbarSide};
use waymark_nav::{
    BrokenLinkPolicy, FooterGroupSpec, FooterLinkSpec, FooterSpec, LinkTarget, NavbarItemSpec,
    NavbarPosition, NavbarSpec, Routing, SiteChrome, SiteMeta, SiteSpec,
};

use crate::error::CliError;

/// Build a [`SiteSpec`] from the loaded configuration.
///
/// # Errors
///
/// Returns `CliError::Config` when a navbar item or footer link does not
/// declare exactly one target. `Config::load` already rejects such files,
/// so this only fires for configs assembled some other way.
pub(crate) fn from_config(config: &Config) -> Result<SiteSpec, CliError> {
    let items = config
        .navbar
        .items
        .iter()
        .map(|item| -> Result<NavbarItemSpec, CliError> {
            Ok(NavbarItemSpec {
                label: item.label.clone(),
                target: link_target(item.target()?),
                position: match item.position {
                    NavbarSide::Left => NavbarPosition::Left,
                    NavbarSide::Right => NavbarPosition::Right,
                },
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let footer = config.footer.as_ref().map(footer_spec).transpose()?;

    Ok(SiteSpec {
        meta: SiteMeta {
            title: config.site.title.clone(),
            tagline: config.site.tagline.clone(),
            url: config.site.url.clone(),
            base_url: config.site.base_url.clone(),
            organization: config.site.organization.clone(),
            project: config.site.project.clone(),
        },
        routing: Routing::new(&config.site.base_url, &config.docs_resolved.route_base),
        chrome: SiteChrome {
            navbar: NavbarSpec {
                title: config.navbar.title.clone(),
                items,
            },
            footer,
        },
        broken_links: match config.site.on_broken_links {
            BrokenLinks::Ignore => BrokenLinkPolicy::Ignore,
            BrokenLinks::Warn => BrokenLinkPolicy::Warn,
            BrokenLinks::Throw => BrokenLinkPolicy::Throw,
        },
    })
}

fn footer_spec(footer: &FooterSection) -> Result<FooterSpec, CliError> {
    let groups = footer
        .groups
        .iter()
        .map(|group| -> Result<FooterGroupSpec, CliError> {
            let links = group
                .links
                .iter()
                .map(|link| -> Result<FooterLinkSpec, CliError> {
                    Ok(FooterLinkSpec {
                        label: link.label.clone(),
                        target: link_target(link.target()?),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(FooterGroupSpec {
                title: group.title.clone(),
                links,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FooterSpec {
        style: footer.style.clone(),
        copyright: footer.copyright.clone(),
        groups,
    })
}

fn link_target(link: LinkRef<'_>) -> LinkTarget {
    match link {
        LinkRef::Doc(id) => LinkTarget::Doc(id.to_owned()),
        LinkRef::Route(to) => LinkTarget::Route(to.to_owned()),
        LinkRef::Href(url) => LinkTarget::Href(url.to_owned()),
    }
}
