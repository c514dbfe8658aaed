use actix::{Actor, ActorContext, AsyncContext, Handler, Message, Running, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;

use system::{new_session_id, ClientMessage, ServerMessage, SessionId};

use crate::server::{ServerCommand, ServerTx};

#[derive(Message)]
#[rtype(result = "()")]
struct ConnectionActorMessage(ServerMessage);

struct ConnectionActor {
    session_id: SessionId,
    srv_tx: ServerTx,
}

impl ConnectionActor {
    fn forward(&self, command: ServerCommand, ctx: &mut ws::WebsocketContext<Self>) {
        if self.srv_tx.send(command).is_err() {
            log::warn!("Server is gone, closing connection {}", self.session_id);
            ctx.stop();
        }
    }
}

impl Actor for ConnectionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ServerMessage>();
        let session_id = self.session_id;

        self.forward(ServerCommand::Connect { session_id, tx }, ctx);

        let addr = ctx.address().recipient();

        tokio::spawn(async move {
            log::debug!("connection {} green thread - started", session_id);
            while let Some(msg) = rx.recv().await {
                if addr.do_send(ConnectionActorMessage(msg)).is_err() {
                    break;
                }
            }
            log::debug!("connection {} green thread - terminated", session_id);
        });
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        let _ = self.srv_tx.send(ServerCommand::Disconnect {
            from: self.session_id,
        });
        Running::Stop
    }
}

/// Ingress
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ConnectionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Text(text)) => match ClientMessage::decode(&text) {
                Ok(message) => {
                    log::debug!("Ingress {} {:?}", self.session_id, message);
                    let from = self.session_id;
                    self.forward(ServerCommand::ClientMessage { from, message }, ctx);
                }
                Err(err) => log::warn!("Ingress {} ignored: {}", self.session_id, err),
            },
            Ok(ws::Message::Binary(bin)) => {
                log::debug!("Ingress {} binary frame ignored, size: {}", self.session_id, bin.len());
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(err) => {
                log::warn!("Connection {} protocol error: {}", self.session_id, err);
                ctx.stop();
            }
            _ => (),
        }
    }
}

/// Egress
impl Handler<ConnectionActorMessage> for ConnectionActor {
    type Result = ();

    fn handle(
        &mut self,
        msg: ConnectionActorMessage,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Self::Result {
        log::debug!("Egress {} {:?}", self.session_id, msg.0);
        match msg.0.encode() {
            Ok(text) => ctx.text(text),
            Err(err) => log::warn!("Egress {} dropped: {}", self.session_id, err),
        }
    }
}

pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    srv_tx: web::Data<ServerTx>,
) -> Result<HttpResponse, Error> {
    ws::start(
        ConnectionActor {
            session_id: new_session_id(),
            srv_tx: srv_tx.get_ref().clone(),
        },
        &req,
        stream,
    )
}
