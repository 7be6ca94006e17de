use super::*;

pub struct SAdapter<B: TBackend> {
    raw: B::Adapter,
    desc: t12::SAdapterDesc,
}

impl<B: TBackend> SAdapter<B> {
    pub fn new_from_raw(raw: B::Adapter, desc: t12::SAdapterDesc) -> Self {
        Self {
            raw: raw,
            desc: desc,
        }
    }

    pub fn raw(&self) -> &B::Adapter {
        &self.raw
    }

    pub fn desc(&self) -> &t12::SAdapterDesc {
        &self.desc
    }

    // -- tries each feature level from the highest down and keeps the first that works
    pub fn create_device(&self, d3d_debug: bool) -> anyhow::Result<SDevice<B>> {
        for level in t12::EFeatureLevel::DESCENDING.iter() {
            match self.raw.d3d12createdevice(*level) {
                Ok(device) => {
                    info!("Created device at feature level {}", level.name());

                    if d3d_debug {
                        device
                            .install_info_queue_filter()
                            .context("Installing info queue filter")?;
                        debug!("Info queue filter installed");
                    }

                    return Ok(SDevice::new_from_raw(device, *level));
                }
                Err(e) => debug!("Feature level {} not supported: {}", level.name(), e),
            }
        }

        bail!(
            "Adapter '{}' supports none of feature levels 12.2, 12.1 or 12.0",
            self.desc.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::niced3d12::testbackend::*;

    #[test]
    fn test_skips_software_adapters() {
        let log = STestLog::new();
        log.set_adapters(vec![
            STestAdapterConfig::software("Basic Render Driver"),
            STestAdapterConfig::hardware("Discrete GPU", Some(t12::EFeatureLevel::Level12_1)),
        ]);
        let factory = SFactory::<STestBackend>::new_from_raw(STestFactory::new(&log));

        let adapter = factory.create_best_adapter().unwrap();
        assert_eq!(adapter.desc().description, "Discrete GPU");
        assert!(!adapter.desc().software);
    }

    #[test]
    fn test_no_hardware_adapter_is_fatal() {
        let log = STestLog::new();
        log.set_adapters(vec![STestAdapterConfig::software("Basic Render Driver")]);
        let factory = SFactory::<STestBackend>::new_from_raw(STestFactory::new(&log));

        assert!(factory.create_best_adapter().is_err());
    }

    #[test]
    fn test_negotiates_highest_level() {
        let log = STestLog::new();
        log.set_adapters(vec![STestAdapterConfig::hardware(
            "Discrete GPU",
            Some(t12::EFeatureLevel::Level12_1),
        )]);
        let factory = SFactory::<STestBackend>::new_from_raw(STestFactory::new(&log));

        let device = factory
            .create_best_adapter()
            .unwrap()
            .create_device(false)
            .unwrap();
        assert_eq!(device.feature_level(), t12::EFeatureLevel::Level12_1);
        assert_eq!(
            log.device_attempts(),
            vec![t12::EFeatureLevel::Level12_2, t12::EFeatureLevel::Level12_1]
        );
        assert_eq!(
            log.count(|e| matches!(e, ETestEvent::InfoQueueFilter)),
            0
        );
    }

    #[test]
    fn test_unsupported_feature_levels_are_fatal() {
        let log = STestLog::new();
        log.set_adapters(vec![STestAdapterConfig::hardware("Old GPU", None)]);
        let factory = SFactory::<STestBackend>::new_from_raw(STestFactory::new(&log));

        let adapter = factory.create_best_adapter().unwrap();
        assert!(adapter.create_device(false).is_err());
        assert_eq!(log.device_attempts().len(), 3);
    }

    #[test]
    fn test_debug_installs_info_queue_filter() {
        let log = STestLog::new();
        let factory = SFactory::<STestBackend>::new_from_raw(STestFactory::new(&log));

        factory
            .create_best_adapter()
            .unwrap()
            .create_device(true)
            .unwrap();
        assert_eq!(
            log.count(|e| matches!(e, ETestEvent::InfoQueueFilter)),
            1
        );
    }
}
