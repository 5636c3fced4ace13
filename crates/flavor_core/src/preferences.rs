//! The preference layer of the merger.
//!
//! Preferences are defaults. Device, feature and firmware preferences fill
//! fields that are unset and leave everything else alone, at the finest
//! granularity available: per disk, per interface, per Hyper-V
//! enlightenment. Machine type and clock are single values and report a
//! conflict when the caller already chose one.

use flavor_api::{
    Bios, Bootloader, Clock, ClockPreferences, DevicePreferences, DiskBus, DiskTarget, DomainSpec,
    Efi, FeatureHyperv, FeaturePreferences, Features, Firmware, FirmwarePreferences, Machine,
    MachinePreferences, VirtualMachineInstanceSpec, VirtualMachinePreferenceSpec,
};

use crate::{Conflicts, FieldPath};

#[cfg(test)]
#[path = "preferences_tests.rs"]
mod tests;

pub(crate) fn apply_preferences(
    base_path: &FieldPath,
    preference: &VirtualMachinePreferenceSpec,
    vmi: &mut VirtualMachineInstanceSpec,
) -> Conflicts {
    let domain_path = base_path.child("domain");
    let domain = &mut vmi.domain;
    let mut conflicts = Conflicts::new();

    if let Some(devices) = preference.devices.as_ref() {
        apply_device_preferences(devices, domain);
    }
    if let Some(features) = preference.features.as_ref() {
        apply_feature_preferences(features, domain);
    }
    if let Some(firmware) = preference.firmware.as_ref() {
        apply_firmware_preferences(firmware, domain);
    }
    if let Some(machine) = preference.machine.as_ref() {
        conflicts.extend(apply_machine_preferences(&domain_path, machine, domain));
    }
    if let Some(clock) = preference.clock.as_ref() {
        conflicts.extend(apply_clock_preferences(&domain_path, clock, domain));
    }
    conflicts
}

/// Copy `preferred` into `target` when `target` is unset.
fn fill<T: Clone>(target: &mut Option<T>, preferred: &Option<T>) {
    if target.is_none() {
        target.clone_from(preferred);
    }
}

/// Run `apply` on the value in `slot`. An empty slot stays empty unless
/// `apply` wrote something.
fn fill_nested<T: Default + PartialEq>(slot: &mut Option<T>, apply: impl FnOnce(&mut T)) {
    match slot {
        Some(value) => apply(value),
        None => {
            let mut value = T::default();
            apply(&mut value);
            if value != T::default() {
                *slot = Some(value);
            }
        }
    }
}

fn apply_device_preferences(preferences: &DevicePreferences, domain: &mut DomainSpec) {
    let devices = &mut domain.devices;

    fill(
        &mut devices.autoattach_graphics_device,
        &preferences.preferred_autoattach_graphics_device,
    );
    fill(
        &mut devices.autoattach_mem_balloon,
        &preferences.preferred_autoattach_mem_balloon,
    );
    fill(
        &mut devices.autoattach_pod_interface,
        &preferences.preferred_autoattach_pod_interface,
    );
    fill(
        &mut devices.autoattach_serial_console,
        &preferences.preferred_autoattach_serial_console,
    );
    fill(
        &mut devices.use_virtio_transitional,
        &preferences.preferred_use_virtio_transitional,
    );
    fill(&mut devices.disable_hotplug, &preferences.preferred_disable_hotplug);
    fill(
        &mut devices.network_interface_multi_queue,
        &preferences.preferred_network_interface_multi_queue,
    );
    fill(
        &mut devices.block_multi_queue,
        &preferences.preferred_block_multi_queue,
    );

    for disk in devices.disks.iter_mut() {
        if disk.device.is_unset() {
            disk.device.disk = Some(DiskTarget::default());
        }
        if let Some(target) = disk.device.disk.as_mut() {
            fill(&mut target.bus, &preferences.preferred_disk_bus);
            if target.bus == Some(DiskBus::Virtio) {
                fill(
                    &mut disk.dedicated_io_thread,
                    &preferences.preferred_disk_dedicated_io_thread,
                );
            }
        }
        if let Some(target) = disk.device.cdrom.as_mut() {
            fill(&mut target.bus, &preferences.preferred_cdrom_bus);
        }
        if let Some(target) = disk.device.lun.as_mut() {
            fill(&mut target.bus, &preferences.preferred_lun_bus);
        }
        fill(&mut disk.block_size, &preferences.preferred_disk_block_size);
        fill(&mut disk.cache, &preferences.preferred_disk_cache);
        fill(&mut disk.io, &preferences.preferred_disk_io);
    }

    for interface in devices.interfaces.iter_mut() {
        fill(&mut interface.model, &preferences.preferred_interface_model);
    }

    for input in devices.inputs.iter_mut() {
        fill(&mut input.bus, &preferences.preferred_input_bus);
        fill(&mut input.input_type, &preferences.preferred_input_type);
    }

    if let Some(sound) = devices.sound.as_mut() {
        fill(&mut sound.model, &preferences.preferred_sound_model);
    }

    fill(&mut devices.rng, &preferences.preferred_rng);
    fill(&mut devices.tpm, &preferences.preferred_tpm);
}

fn apply_feature_preferences(preferences: &FeaturePreferences, domain: &mut DomainSpec) {
    fill_nested(&mut domain.features, |features: &mut Features| {
        fill(&mut features.acpi, &preferences.preferred_acpi);
        fill(&mut features.apic, &preferences.preferred_apic);
        fill(&mut features.kvm, &preferences.preferred_kvm);
        fill(&mut features.pvspinlock, &preferences.preferred_pvspinlock);
        fill(&mut features.smm, &preferences.preferred_smm);
        fill(&mut features.ioapic, &preferences.preferred_ioapic);
        fill(&mut features.pic, &preferences.preferred_pic);

        if let Some(preferred) = preferences.preferred_hyperv.as_ref() {
            match features.hyperv.as_mut() {
                Some(hyperv) => apply_hyperv_preferences(preferred, hyperv),
                None => features.hyperv = Some(preferred.clone()),
            }
        }
    });
}

fn apply_hyperv_preferences(preferred: &FeatureHyperv, hyperv: &mut FeatureHyperv) {
    fill(&mut hyperv.relaxed, &preferred.relaxed);
    fill(&mut hyperv.vapic, &preferred.vapic);
    fill(&mut hyperv.spinlocks, &preferred.spinlocks);
    fill(&mut hyperv.vpindex, &preferred.vpindex);
    fill(&mut hyperv.runtime, &preferred.runtime);
    fill(&mut hyperv.synic, &preferred.synic);
    fill(&mut hyperv.synic_timer, &preferred.synic_timer);
    fill(&mut hyperv.reset, &preferred.reset);
    fill(&mut hyperv.vendor_id, &preferred.vendor_id);
    fill(&mut hyperv.frequencies, &preferred.frequencies);
    fill(&mut hyperv.reenlightenment, &preferred.reenlightenment);
    fill(&mut hyperv.tlb_flush, &preferred.tlb_flush);
    fill(&mut hyperv.ipi, &preferred.ipi);
    fill(&mut hyperv.evmcs, &preferred.evmcs);
}

fn apply_firmware_preferences(preferences: &FirmwarePreferences, domain: &mut DomainSpec) {
    fill_nested(&mut domain.firmware, |firmware: &mut Firmware| {
        fill_nested(&mut firmware.bootloader, |bootloader: &mut Bootloader| {
            apply_bootloader_preferences(preferences, bootloader);
        });
    });
}

fn apply_bootloader_preferences(preferences: &FirmwarePreferences, bootloader: &mut Bootloader) {
    let no_bootloader = bootloader.bios.is_none() && bootloader.efi.is_none();
    if no_bootloader && preferences.preferred_use_bios == Some(true) {
        bootloader.bios = Some(Bios {
            use_serial: preferences.preferred_use_bios_serial,
        });
    } else if no_bootloader && preferences.preferred_use_efi == Some(true) {
        bootloader.efi = Some(Efi {
            secure_boot: preferences.preferred_use_secure_boot,
        });
    }

    if let Some(bios) = bootloader.bios.as_mut() {
        fill(&mut bios.use_serial, &preferences.preferred_use_bios_serial);
    }
    if let Some(efi) = bootloader.efi.as_mut() {
        fill(&mut efi.secure_boot, &preferences.preferred_use_secure_boot);
    }
}

fn apply_machine_preferences(
    domain_path: &FieldPath,
    preferences: &MachinePreferences,
    domain: &mut DomainSpec,
) -> Conflicts {
    let mut conflicts = Conflicts::new();
    let Some(machine_type) = preferences.preferred_machine_type.as_ref() else {
        return conflicts;
    };

    let machine = domain.machine.get_or_insert_with(Machine::default);
    match machine.machine_type.as_deref() {
        Some(current) if !current.is_empty() => {
            conflicts.push(domain_path.child("machine").child("type"));
        }
        _ => machine.machine_type = Some(machine_type.clone()),
    }
    conflicts
}

fn apply_clock_preferences(
    domain_path: &FieldPath,
    preferences: &ClockPreferences,
    domain: &mut DomainSpec,
) -> Conflicts {
    let mut conflicts = Conflicts::new();
    let clock_path = domain_path.child("clock");

    if let Some(offset) = preferences.preferred_clock_offset.as_ref() {
        match domain.clock.as_mut() {
            Some(clock) if !clock.offset.is_empty() => conflicts.push(clock_path.clone()),
            Some(clock) => clock.offset = offset.clone(),
            None => {
                domain.clock = Some(Clock {
                    offset: offset.clone(),
                    timer: None,
                })
            }
        }
    }

    if let Some(timer) = preferences.preferred_timer.as_ref() {
        match domain.clock.as_mut() {
            Some(clock) if clock.timer.is_some() => conflicts.push(clock_path.child("timer")),
            Some(clock) => clock.timer = Some(timer.clone()),
            None => {
                domain.clock = Some(Clock {
                    offset: Default::default(),
                    timer: Some(timer.clone()),
                })
            }
        }
    }
    conflicts
}
