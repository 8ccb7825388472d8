use crate::{
    classify, has_changed, translate, validate, ApiResponse, Disposition, Effect, Msg,
    PipelineError, PollState,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PollState, msg: Msg) -> (PollState, Vec<Effect>) {
    let effects = match msg {
        Msg::Polled(Ok(raw)) => match validate(&raw) {
            Ok(response) => {
                state.advance_to(response.current_date);
                observe(&state, &response)
            }
            Err(err) => failure(&PipelineError::from(err)),
        },
        Msg::Polled(Err(err)) => failure(&err),
        Msg::Notified { outcome, observed } => {
            state.record_sent(outcome.last_sent);
            if let Some(record) = observed {
                state.record_observed(record);
            }
            Vec::new()
        }
        Msg::NotifyFailed(err) => failure(&err),
    };

    (state, effects)
}

fn observe(state: &PollState, response: &ApiResponse) -> Vec<Effect> {
    let Some(current) = response.tracked() else {
        return Vec::new();
    };
    if !has_changed(state.last_observed(), current) {
        return vec![Effect::Unchanged {
            name: current.name.clone(),
            updated_at: current.updated_at(),
        }];
    }
    match translate(current) {
        Ok(text) => vec![Effect::Notify {
            text,
            observed: Some(current.clone()),
        }],
        Err(err) => failure(&err),
    }
}

fn failure(err: &PipelineError) -> Vec<Effect> {
    let classified = classify(err);
    match classified.disposition {
        Disposition::Fatal => vec![Effect::Abort(classified)],
        Disposition::Suppressible => vec![Effect::Report(classified)],
        Disposition::Notifiable => {
            let text = classified.operator_message();
            vec![
                Effect::Report(classified),
                Effect::Notify {
                    text,
                    observed: None,
                },
            ]
        }
    }
}
