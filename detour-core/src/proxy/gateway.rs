use crate::ctx::{RequestCtx, ResponseCtx};
use crate::device::core::pipeline::DevicePipeline;
use crate::device::core::registry::DeviceRegistry;
use crate::device::core::result::DeviceResult;
use async_trait::async_trait;
use pingora::prelude::{HttpPeer, ProxyHttp, Session};
use pingora::{Custom, Error};
use pingora_http::{RequestHeader, ResponseHeader};
use std::sync::Arc;

/// Gateway is the orchestration point between Pingora and the device
/// pipeline: it hydrates the request context, runs the on-request devices,
/// and either writes a device-produced response or proxies to the single
/// configured upstream.
pub struct DetourGateway {
    upstream_host: String,
    upstream_port: u16,
    use_tls: bool,
    sni: String,

    devices: Arc<DeviceRegistry>,
}

impl DetourGateway {
    pub fn new(upstream_host: String, upstream_port: u16, devices: Arc<DeviceRegistry>) -> Self {
        Self {
            upstream_host,
            upstream_port,
            use_tls: false,     // plaintext upstream
            sni: String::new(), // no SNI
            devices,
        }
    }

    /// Write a device-produced response in full: status, headers, no body.
    async fn respond(&self, session: &mut Session, resp: ResponseCtx) -> pingora::Result<()> {
        let mut header = ResponseHeader::build(resp.status, Some(resp.headers.len()))?;

        for (name, value) in resp.headers.iter() {
            header.insert_header(name, value)?;
        }

        session.write_response_header(Box::new(header), true).await?;

        Ok(())
    }
}

#[async_trait]
impl ProxyHttp for DetourGateway {
    type CTX = RequestCtx;

    fn new_ctx(&self) -> Self::CTX {
        // Placeholder; real initialization happens in request_filter.
        RequestCtx::empty()
    }

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora::Result<Box<HttpPeer>> {
        let addr = (self.upstream_host.as_str(), self.upstream_port);
        let peer = HttpPeer::new(addr, self.use_tls, self.sni.clone());

        Ok(Box::new(peer))
    }

    /// Detour `on_request` --> Pingora `request_filter`
    ///
    /// ACCEPT --> INSPECT --> (RESPOND | PROXY)
    async fn request_filter(
        &self,
        session: &mut Session,
        ctx: &mut Self::CTX,
    ) -> pingora::Result<bool> {
        // The request ctx exists before now, but has no data.
        ctx.hydrate_from_session(session);

        match DevicePipeline::run_on_request(self.devices.all(), ctx) {
            DeviceResult::Continue => Ok(false),

            DeviceResult::Respond(resp) => {
                self.respond(session, resp).await?;
                Ok(true)
            }

            DeviceResult::Error(err) => {
                tracing::error!("device error in on_request: {err}");
                session.respond_error(500).await?;
                Ok(true)
            }
        }
    }

    /// Apply upstream intent derived from the request context: the target a
    /// device rewrote, or the original one.
    async fn upstream_request_filter(
        &self,
        _session: &mut Session,
        upstream: &mut RequestHeader,
        ctx: &mut Self::CTX,
    ) -> pingora::Result<()> {
        let uri: http::Uri = ctx
            .upstream_path()
            .parse()
            .map_err(|_| Error::new(Custom("rewritten target is not a valid URI")))?;

        upstream.set_uri(uri);

        Ok(())
    }

    /// Run on-response devices and merge device-staged headers into the
    /// final response.
    async fn response_filter(
        &self,
        _session: &mut Session,
        upstream: &mut ResponseHeader,
        ctx: &mut Self::CTX,
    ) -> pingora::Result<()> {
        let mut resp_ctx = ResponseCtx::new(upstream.status, upstream.headers.clone(), Vec::new());

        match DevicePipeline::run_on_response(self.devices.all(), &mut resp_ctx) {
            DeviceResult::Continue => {}
            DeviceResult::Respond(_) => {}
            DeviceResult::Error(err) => {
                // Too late to change the outcome; observe only.
                tracing::warn!("device error in on_response: {err}");
            }
        }

        upstream.set_status(resp_ctx.status)?;

        for (name, value) in ctx.response_headers.iter() {
            upstream.insert_header(name, value)?;
        }

        Ok(())
    }
}
