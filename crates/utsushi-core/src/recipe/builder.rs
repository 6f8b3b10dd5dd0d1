use crate::stages::StageConfig;

/// Ordered stage list under construction.
///
/// Stages that must run first go to `head`. Everything else lives in
/// `tail`: middle insertions are prepended, late insertions appended, so
/// the middle ends up between the two. A stage name appears at most once.
#[derive(Debug, Default)]
pub(crate) struct ConfigBuilder {
    head: Vec<StageConfig>,
    tail: Vec<StageConfig>,
}

fn position(list: &[StageConfig], config: &StageConfig) -> Option<usize> {
    list.iter().position(|c| c.name() == config.name())
}

/// Replace the existing entry when `force_replace` is set; report whether
/// the stage was already present.
fn replace_existing(list: &mut [StageConfig], config: &StageConfig, force_replace: bool) -> bool {
    match position(list, config) {
        Some(i) => {
            if force_replace {
                list[i] = config.clone();
            }
            true
        }
        None => false,
    }
}

impl ConfigBuilder {
    pub(crate) fn insert_head(&mut self, config: StageConfig, force_replace: bool) {
        if !replace_existing(&mut self.head, &config, force_replace) {
            self.head.insert(0, config);
        }
    }

    pub(crate) fn insert_middle(&mut self, config: StageConfig, force_replace: bool) {
        if !replace_existing(&mut self.tail, &config, force_replace) {
            self.tail.insert(0, config);
        }
    }

    pub(crate) fn insert_tail(&mut self, config: StageConfig, force_replace: bool) {
        if !replace_existing(&mut self.tail, &config, force_replace) {
            self.tail.push(config);
        }
    }

    pub(crate) fn build(self) -> Vec<StageConfig> {
        let mut configs = self.head;
        configs.extend(self.tail);
        configs
    }
}
