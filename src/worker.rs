//! 문서 변환 워커 풀
//!
//! 파일 I/O가 있는 DOCX 변환을 호출 스레드 밖에서 처리합니다.
//! 각 작업은 자신의 입력/출력 파일만 다루므로 작업 간 조율은 없습니다.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::document::{convert_docx_file, ConvertedDocument, DocumentError, RequestedDirection};

/// 변환 작업 결과
pub type JobResult = Result<ConvertedDocument, DocumentError>;

/// 워커 스레드가 처리할 작업 항목
enum WorkItem {
    /// DOCX 파일 변환 (입력, 출력, 방향, 결과 회신 채널)
    Convert {
        input: PathBuf,
        output: PathBuf,
        direction: RequestedDirection,
        reply: Sender<JobResult>,
    },
}

/// 고정 크기 변환 워커 풀
pub struct ConversionPool {
    sender: Option<Sender<WorkItem>>,
    workers: Vec<JoinHandle<()>>,
}

impl ConversionPool {
    /// `threads` 개의 워커 생성 (최소 1개)
    pub fn new(threads: usize) -> Self {
        let (sender, receiver) = mpsc::channel::<WorkItem>();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..threads.max(1))
            .map(|id| {
                let receiver = Arc::clone(&receiver);
                thread::Builder::new()
                    .name(format!("latinify-worker-{}", id))
                    .spawn(move || worker_loop(id, receiver))
            })
            .filter_map(|spawned| match spawned {
                Ok(handle) => Some(handle),
                Err(e) => {
                    log::error!("워커 스레드 생성 실패: {}", e);
                    None
                }
            })
            .collect();

        Self {
            sender: Some(sender),
            workers,
        }
    }

    /// 변환 작업 제출, 결과는 반환된 채널로 전달됨
    pub fn submit(
        &self,
        input: PathBuf,
        output: PathBuf,
        direction: RequestedDirection,
    ) -> Receiver<JobResult> {
        let (reply, result) = mpsc::channel();
        let item = WorkItem::Convert {
            input,
            output,
            direction,
            reply: reply.clone(),
        };

        let sent = self.sender.as_ref().map(|s| s.send(item));
        if !matches!(sent, Some(Ok(()))) {
            let _ = reply.send(Err(DocumentError::failure("konvertatsiya navbati yopilgan")));
        }
        result
    }

    /// 살아 있는 워커 수
    pub fn size(&self) -> usize {
        self.workers.len()
    }
}

impl Drop for ConversionPool {
    fn drop(&mut self) {
        // 채널을 닫아 워커 루프를 종료시킴
        self.sender.take();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                log::error!("워커 스레드 패닉");
            }
        }
    }
}

fn worker_loop(id: usize, receiver: Arc<Mutex<Receiver<WorkItem>>>) {
    loop {
        let item = {
            let Ok(guard) = receiver.lock() else {
                log::error!("워커 {} 수신 채널 잠금 실패", id);
                return;
            };
            match guard.recv() {
                Ok(item) => item,
                Err(_) => return,
            }
        };

        match item {
            WorkItem::Convert {
                input,
                output,
                direction,
                reply,
            } => {
                log::debug!("워커 {}: {} 변환 시작 ({})", id, input.display(), direction);
                let result = convert_docx_file(&input, &output, direction);
                if let Err(e) = &result {
                    log::warn!("워커 {}: {} 변환 실패: {}", id, input.display(), e);
                }
                let _ = reply.send(result);
            }
        }
    }
}
