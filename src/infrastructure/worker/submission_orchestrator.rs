//! Submission Orchestrator - 提交生命周期编排
//!
//! 用户操作和服务完成事件都经过同一个 mpsc 队列，由编排器单线程消费，
//! 保证任意时刻只有一个当前状态。服务调用在独立任务中执行，不会被取消。

use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};
use uuid::Uuid;

use crate::application::ports::ClassificationServicePort;
use crate::application::{ApplicationError, UserAction};
use crate::domain::classification::{
    fallback_message, ClassificationError, ClassificationResult, Dispatch, Generation, ImageFile,
    MachineEvent, Mode, SubmissionMachine, SubmissionSnapshot,
};
use crate::infrastructure::events::{EventPublisher, SubmissionEvent};

/// 编排器配置
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// 消息队列容量
    pub queue_capacity: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self { queue_capacity: 64 }
    }
}

enum OrchestratorMessage {
    Action(UserAction),
    Completed {
        generation: Generation,
        request_id: Uuid,
        outcome: Result<ClassificationResult, ClassificationError>,
    },
    Snapshot(oneshot::Sender<SubmissionSnapshot>),
    Shutdown,
}

/// 提交编排器
///
/// 持有状态机，是队列的唯一消费者
pub struct SubmissionOrchestrator {
    machine: SubmissionMachine,
    receiver: mpsc::Receiver<OrchestratorMessage>,
    completions: mpsc::WeakSender<OrchestratorMessage>,
    service: Arc<dyn ClassificationServicePort>,
    publisher: Arc<EventPublisher>,
}

impl SubmissionOrchestrator {
    pub fn new(
        config: OrchestratorConfig,
        service: Arc<dyn ClassificationServicePort>,
        publisher: Arc<EventPublisher>,
    ) -> (Self, OrchestratorHandle) {
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let orchestrator = Self {
            machine: SubmissionMachine::new(),
            receiver,
            completions: sender.downgrade(),
            service,
            publisher: publisher.clone(),
        };
        let handle = OrchestratorHandle { sender, publisher };
        (orchestrator, handle)
    }

    /// 启动编排循环，直到收到 Shutdown 或所有发送端关闭
    pub async fn run(mut self) {
        tracing::info!(mode = %self.machine.mode(), "SubmissionOrchestrator started");

        while let Some(message) = self.receiver.recv().await {
            match message {
                OrchestratorMessage::Action(action) => {
                    tracing::debug!(action = action.name(), "User action received");
                    self.apply(action.into());
                }
                OrchestratorMessage::Completed {
                    generation,
                    request_id,
                    outcome,
                } => {
                    let succeeded = outcome.is_ok();
                    let changed = self.apply(MachineEvent::Completed {
                        generation,
                        outcome,
                    });
                    if changed {
                        tracing::info!(
                            request_id = %request_id,
                            generation = %generation,
                            succeeded,
                            "Submission resolved"
                        );
                    } else {
                        tracing::debug!(
                            request_id = %request_id,
                            generation = %generation,
                            current = %self.machine.generation(),
                            "Stale completion dropped"
                        );
                    }
                }
                OrchestratorMessage::Snapshot(reply) => {
                    let _ = reply.send(self.machine.snapshot().clone());
                }
                OrchestratorMessage::Shutdown => break,
            }
        }

        tracing::info!("SubmissionOrchestrator stopped");
    }

    /// 应用事件并处理副作用，返回状态是否改变
    fn apply(&mut self, event: MachineEvent) -> bool {
        let (applied, dispatch) = self.machine.apply(event);

        if applied.changed {
            let snapshot = self.machine.snapshot();
            tracing::debug!(
                mode = %snapshot.mode,
                generation = %snapshot.generation,
                state = snapshot.state.name(),
                "Submission state changed"
            );
            self.publisher
                .publish_state_changed(snapshot.mode, snapshot.generation, snapshot.intent());
        }

        if let Some(dispatch) = dispatch {
            self.spawn_dispatch(dispatch);
        }

        applied.changed
    }

    fn spawn_dispatch(&mut self, dispatch: Dispatch) {
        let Dispatch {
            generation,
            request,
        } = dispatch;
        let request_id = Uuid::new_v4();
        let mode = request.mode();

        let Some(completions) = self.completions.upgrade() else {
            // 队列已无发送端，直接以失败结束本次提交
            tracing::warn!(generation = %generation, "Queue closed before dispatch");
            self.apply(MachineEvent::Completed {
                generation,
                outcome: Err(ClassificationError::transport(fallback_message(mode))),
            });
            return;
        };

        tracing::info!(
            request_id = %request_id,
            generation = %generation,
            mode = %mode,
            "Dispatching classification request"
        );

        let service = self.service.clone();
        tokio::spawn(async move {
            let outcome = service.classify(request).await;
            let message = OrchestratorMessage::Completed {
                generation,
                request_id,
                outcome,
            };
            if completions.send(message).await.is_err() {
                tracing::debug!(request_id = %request_id, "Orchestrator stopped, completion discarded");
            }
        });
    }
}

/// 编排器句柄，供界面层发送操作
#[derive(Clone)]
pub struct OrchestratorHandle {
    sender: mpsc::Sender<OrchestratorMessage>,
    publisher: Arc<EventPublisher>,
}

impl OrchestratorHandle {
    async fn send(&self, action: UserAction) -> Result<(), ApplicationError> {
        self.sender
            .send(OrchestratorMessage::Action(action))
            .await
            .map_err(ApplicationError::from)
    }

    pub async fn select_mode(&self, mode: Mode) -> Result<(), ApplicationError> {
        self.send(UserAction::SelectMode(mode)).await
    }

    pub async fn submit_text(&self, text: impl Into<String>) -> Result<(), ApplicationError> {
        self.send(UserAction::SubmitText(text.into())).await
    }

    pub async fn submit_image(&self, file: Option<ImageFile>) -> Result<(), ApplicationError> {
        self.send(UserAction::SubmitImage(file)).await
    }

    pub async fn dismiss_error(&self) -> Result<(), ApplicationError> {
        self.send(UserAction::DismissError).await
    }

    pub async fn new_analysis(&self) -> Result<(), ApplicationError> {
        self.send(UserAction::NewAnalysis).await
    }

    /// 获取当前状态快照（在此之前发送的操作均已生效）
    pub async fn snapshot(&self) -> Result<SubmissionSnapshot, ApplicationError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(OrchestratorMessage::Snapshot(tx))
            .await
            .map_err(ApplicationError::from)?;
        Ok(rx.await?)
    }

    /// 订阅状态变更事件
    pub fn subscribe(&self) -> broadcast::Receiver<SubmissionEvent> {
        self.publisher.subscribe()
    }

    /// 停止编排器
    pub async fn shutdown(&self) -> Result<(), ApplicationError> {
        self.sender
            .send(OrchestratorMessage::Shutdown)
            .await
            .map_err(ApplicationError::from)
    }
}
