use crate::broker::{ComputeId, FlowId, WorkflowEvent, WorkflowId, WorkflowLog};
use crate::sim::SimTime;

#[test]
fn workflow_log_is_append_only_and_preserves_order() {
    let mut log = WorkflowLog::default();
    let wf = WorkflowId(1);
    log.append(wf, WorkflowEvent::Submitted { at: SimTime(100) });
    log.append(wf, WorkflowEvent::SourceDc { name: "edge".to_string() });
    log.append(wf, WorkflowEvent::EdgeletQueued { unit: ComputeId(1) });
    log.append(wf, WorkflowEvent::EdgeToCloudFlow { flow: FlowId(2) });
    log.append(wf, WorkflowEvent::CloudletQueued { unit: ComputeId(2) });
    log.append(wf, WorkflowEvent::Finished { at: SimTime(900) });

    assert_eq!(log.events(wf).len(), 6);
    assert!(matches!(log.events(wf)[0], WorkflowEvent::Submitted { .. }));
    assert!(matches!(log.events(wf)[5], WorkflowEvent::Finished { .. }));
    assert_eq!(log.submit_time(wf), Some(SimTime(100)));
    assert_eq!(log.finish_time(wf), Some(SimTime(900)));
}

#[test]
fn workflow_log_counts_only_finished_pipelines() {
    let mut log = WorkflowLog::default();
    log.append(WorkflowId(1), WorkflowEvent::Submitted { at: SimTime(1) });
    log.append(WorkflowId(1), WorkflowEvent::Finished { at: SimTime(5) });
    log.append(WorkflowId(2), WorkflowEvent::Submitted { at: SimTime(2) });

    assert_eq!(log.len(), 2);
    assert_eq!(log.completed_count(), 1);
    assert_eq!(log.finish_time(WorkflowId(2)), None);
    assert!(log.events(WorkflowId(3)).is_empty());
}
