use crate::conf::DetourConfig;
use crate::device::core::registry::DeviceRegistry;
use crate::proxy::DetourGateway;
use anyhow::Result;
use pingora::prelude::http_proxy_service;
use pingora::server::Server;
use std::sync::Arc;

/// Build the device registry from validated configuration.
///
/// Fails before any listener is bound if a device cannot be built, so an
/// invalid rule never results in a half-configured server.
pub fn build_devices(cfg: &DetourConfig) -> Result<Arc<DeviceRegistry>> {
    let mut registry = DeviceRegistry::new();
    registry.load_from_config(cfg)?;

    Ok(Arc::new(registry))
}

/// Build a fully configured Pingora server, ready to run.
pub fn build_pingora_server(cfg: &DetourConfig) -> Result<Server> {
    let devices = build_devices(cfg)?;

    let (host, port) = cfg.upstream.host_port()?;

    let mut server = Server::new(None)?;
    server.bootstrap();

    let gateway = DetourGateway::new(host, port, devices);

    // Build HTTP proxy service from Pingora.
    let mut svc = http_proxy_service(&server.configuration, gateway);
    svc.add_tcp(&cfg.server.listen);

    server.add_service(svc);

    Ok(server)
}

/// Run the Pingora server with the given configuration. Blocks forever.
pub fn run(cfg: DetourConfig) -> Result<()> {
    tracing::info!(
        listen = %cfg.server.listen,
        upstream = %cfg.upstream.addr,
        rules = cfg.redirect.rules.len(),
        "starting detour"
    );

    let server = build_pingora_server(&cfg)?;
    server.run_forever();
}
